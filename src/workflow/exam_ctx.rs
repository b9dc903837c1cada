/// Context of one exam generation request
///
/// Carries everything the flow needs besides the submission text itself:
/// who asked (artifact files are keyed by requester), which school name to
/// force, and the ministry constant for the letterhead.
#[derive(Debug, Clone)]
pub struct ExamCtx {
    /// Requesting chat; used to key the artifact file name
    pub chat_id: i64,
    /// School name collected by the conversation; wins over an extracted one
    pub school_override: Option<String>,
    /// Ministry name printed at the top of the exam
    pub ministry: String,
}

impl ExamCtx {
    pub fn new(chat_id: i64, ministry: impl Into<String>) -> Self {
        Self {
            chat_id,
            school_override: None,
            ministry: ministry.into(),
        }
    }

    pub fn with_school_override(mut self, school: Option<String>) -> Self {
        self.school_override = school.filter(|s| !s.trim().is_empty());
        self
    }
}
