use thiserror::Error;

/// Everything that can go wrong inside the pet subsystem.
///
/// None of these are fatal: the core logs them and degrades to a no-op.
#[derive(Debug, Error)]
pub enum PetError {
    #[error("missing DOM element #{0}")]
    MissingElement(String),

    #[error("unknown pet action '{0}'")]
    UnknownAction(String),

    #[error("unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error("saved record has version {found}, newest supported is {supported}")]
    RecordVersion { found: u32, supported: u32 },

    #[error("malformed JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl PetError {
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        PetError::UnknownValue { kind, value: value.to_string() }
    }
}

impl From<wasm_bindgen::JsValue> for PetError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PetError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type PetResult<T> = Result<T, PetError>;
