use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Callback invoked once per streamed chunk, in arrival order.
pub type StreamCallback = Box<dyn FnMut(&Value) + Send>;

/// A file attached to a multipart request (e.g. audio for transcription).
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub field: String,
    pub path: PathBuf,
}

/// Request body for a single API call.
///
/// The body is an arbitrary JSON value and is never validated locally; the
/// remote service decides what is acceptable.
pub struct Parameters {
    body: Value,
    stream: Option<StreamCallback>,
    files: Vec<FileUpload>,
}

impl Parameters {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            stream: None,
            files: Vec::new(),
        }
    }

    pub fn with_stream<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Value) + Send + 'static,
    {
        self.stream = Some(Box::new(callback));
        self
    }

    pub fn with_file(mut self, field: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.push(FileUpload {
            field: field.into(),
            path: path.into(),
        });
        self
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn files(&self) -> &[FileUpload] {
        &self.files
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    pub fn into_parts(self) -> (Value, Option<StreamCallback>, Vec<FileUpload>) {
        (self.body, self.stream, self.files)
    }
}

impl From<Value> for Parameters {
    fn from(body: Value) -> Self {
        Parameters::new(body)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters::new(Value::Object(Default::default()))
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameters")
            .field("body", &self.body)
            .field("stream", &self.stream.is_some())
            .field("files", &self.files)
            .finish()
    }
}
