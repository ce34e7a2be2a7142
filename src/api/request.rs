//! Outbound submission request model

/// Whether the question is created or updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update { id: String },
}

impl SubmitTarget {
    /// Path relative to the API base
    pub fn path(&self) -> String {
        match self {
            SubmitTarget::Create => "core/preguntas/".to_string(),
            SubmitTarget::Update { id } => format!("core/preguntas/{id}/"),
        }
    }
}

/// Body of a single multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBody {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Named multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: &'static str,
    pub body: PartBody,
}

/// Ordered multipart body plus where to send it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub target: SubmitTarget,
    pub parts: Vec<Part>,
}

impl SubmitRequest {
    pub fn new(target: SubmitTarget) -> Self {
        Self {
            target,
            parts: Vec::new(),
        }
    }

    pub fn text(&mut self, name: &'static str, value: impl Into<String>) {
        self.parts.push(Part {
            name,
            body: PartBody::Text(value.into()),
        });
    }

    pub fn file(
        &mut self,
        name: &'static str,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    ) {
        self.parts.push(Part {
            name,
            body: PartBody::File {
                file_name,
                content_type,
                bytes,
            },
        });
    }

    /// Text value of the first part with this name
    pub fn text_part(&self, name: &str) -> Option<&str> {
        self.parts.iter().find(|part| part.name == name).and_then(|part| match &part.body {
            PartBody::Text(text) => Some(text.as_str()),
            PartBody::File { .. } => None,
        })
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name == name)
    }
}
