pub mod broadcast;
pub mod dispatcher;
pub mod handler;
pub mod msg_init_handler;
pub mod msg_ping_handler;
pub mod msg_student_handler;
pub mod msg_teacher_handler;

pub use handler::websocket_handler;
