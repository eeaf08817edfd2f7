/// State for each open document
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub content: String,
    /// Version reported by the client, echoed back when publishing diagnostics
    pub version: Option<i32>,
}
