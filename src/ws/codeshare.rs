use serde::Serialize;
use serde_json::Value;

use super::classroom::{ClassError, ClassState, SubmissionState};

/// Shared problem, starter code and the students' submissions.
#[derive(Debug, Default)]
pub struct CodeshareData {
    problem: String,
    common_code: String,
    submissions: Vec<Value>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CodeshareSnapshot {
    pub submissions: Vec<Value>,
    pub problem: String,
    pub common_code: String,
    pub submission_state: SubmissionState,
}

/// The `problem` payload
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ProblemData {
    pub problem: String,
    pub common_code: String,
}

impl CodeshareData {
    pub fn problem(&self) -> &str {
        &self.problem
    }

    pub fn common_code(&self) -> &str {
        &self.common_code
    }

    pub fn submissions(&self) -> &[Value] {
        &self.submissions
    }

    pub(super) fn clear_submissions(&mut self) {
        self.submissions.clear();
    }

    pub(super) fn snapshot(&self, submission_state: SubmissionState) -> CodeshareSnapshot {
        CodeshareSnapshot {
            submissions: self.submissions.clone(),
            problem: self.problem.clone(),
            common_code: self.common_code.clone(),
            submission_state,
        }
    }

    fn problem_data(&self) -> ProblemData {
        ProblemData {
            problem: self.problem.clone(),
            common_code: self.common_code.clone(),
        }
    }
}

impl ClassState {
    /// Replace the problem text and shared code together. Submissions are kept.
    pub fn set_problem(
        &mut self,
        password: &str,
        problem: String,
        common_code: String,
    ) -> Result<ProblemData, ClassError> {
        self.authorize(password)?;
        let data = self.codeshare_mut()?;
        data.problem = problem;
        data.common_code = common_code;
        Ok(data.problem_data())
    }

    /// Append one opaque student submission.
    pub fn append_submission(&mut self, payload: Value) -> Result<&[Value], ClassError> {
        self.ensure_accepting()?;
        let data = self.codeshare_mut()?;
        data.submissions.push(payload);
        Ok(&data.submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassKind;
    use crate::ws::classroom::{ClassData, SubmissionList};
    use serde_json::json;

    fn codeshare(state: &ClassState) -> &CodeshareData {
        match state.data() {
            ClassData::Codeshare(data) => data,
            ClassData::Pollshare(_) => panic!("expected a codeshare class"),
        }
    }

    #[test]
    fn set_problem_replaces_text_and_code_but_keeps_submissions() {
        let mut state = ClassState::new("p1", ClassKind::Codeshare);
        state.append_submission(json!({"code": "print(1)"})).unwrap();

        let problem = state
            .set_problem("p1", "Sum two numbers".into(), "def f(a, b):".into())
            .unwrap();
        assert_eq!(problem.problem, "Sum two numbers");
        assert_eq!(problem.common_code, "def f(a, b):");

        let data = codeshare(&state);
        assert_eq!(data.problem(), "Sum two numbers");
        assert_eq!(data.common_code(), "def f(a, b):");
        assert_eq!(data.submissions().len(), 1);
    }

    #[test]
    fn wrong_password_changes_nothing() {
        let mut state = ClassState::new("p1", ClassKind::Codeshare);
        state.set_problem("p1", "P".into(), "C".into()).unwrap();
        state.append_submission(json!("x=1")).unwrap();
        let before = state.snapshot();

        assert_eq!(
            state.set_problem("p2", "other".into(), "other".into()),
            Err(ClassError::Unauthorized)
        );
        assert_eq!(state.clear_submissions("p2"), Err(ClassError::Unauthorized));
        assert_eq!(state.switch_submission_state("p2"), Err(ClassError::Unauthorized));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn submissions_append_in_order_until_disabled() {
        let mut state = ClassState::new("p1", ClassKind::Codeshare);
        state.append_submission(json!("a")).unwrap();
        let list = state.append_submission(json!("b")).unwrap();
        assert_eq!(list, &[json!("a"), json!("b")]);

        state.toggle_submission_state();
        assert_eq!(state.append_submission(json!("c")), Err(ClassError::SubmissionsDisabled));
        assert_eq!(
            state.submission_list(),
            SubmissionList::Codeshare(vec![json!("a"), json!("b")])
        );
    }

    #[test]
    fn poll_operations_are_rejected() {
        let mut state = ClassState::new("p1", ClassKind::Codeshare);
        assert_eq!(
            state.record_vote("A"),
            Err(ClassError::KindMismatch(ClassKind::Codeshare))
        );
        assert_eq!(
            state.set_poll("p1", "Q", vec!["A".into()]).unwrap_err(),
            ClassError::KindMismatch(ClassKind::Codeshare)
        );
    }
}
