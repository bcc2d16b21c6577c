// Keyed errors for script and settings I/O, plus name parsing

use std::{collections::BTreeMap, fmt, sync::Arc};

#[derive(Debug, Clone)]
pub struct RigError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<RigCause>,
}

#[derive(Debug, Clone)]
pub enum RigCause {
    Rig(Box<RigError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

/// Name lookups that arrive as text (scripts, key maps, config)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown segment `{0}`")]
    UnknownSegment(String),
    #[error("unknown axis `{0}`")]
    UnknownAxis(String),
}

impl RigError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_rig(mut self, cause: RigError) -> Self {
        self.causes.push(RigCause::Rig(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(RigCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for RigError {
    /// `key(name=value, ...)`, then the first cause after a colon
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{}({})", self.key, args.join(", "))?;
        match self.causes.first() {
            Some(RigCause::Rig(e)) => write!(f, ": {e}"),
            Some(RigCause::Std(e)) => write!(f, ": {e}"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for RigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            RigCause::Rig(e) => Some(e.as_ref() as &dyn std::error::Error),
            RigCause::Std(e) => Some(e.as_ref()),
        })
    }
}

impl From<serde_json::Error> for RigError {
    fn from(err: serde_json::Error) -> Self {
        RigError::new("json-error")
            .with_arg("line", err.line())
            .with_arg("column", err.column())
            .push_std(err)
    }
}
