use serde::{Deserialize, Serialize};

/// Whether a fragment is hoisted as a definition or stays scene-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Reusable declaration, emitted once into a shared definitions artifact.
    Define,
    /// Scene-local content, emitted for the scene it belongs to.
    #[default]
    Eval,
}

/// The verdict a classifier returns for one fragment.
///
/// `subtype` names the kind of definition (`template`, `defs`, `function`,
/// `constant`, ...). `definition_name` is the declared identifier, only
/// captured for scripting fragments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Classification {
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_name: Option<String>,
}

impl Classification {
    /// The fallback verdict: evaluate in place, no subtype.
    pub fn eval() -> Self {
        Self::default()
    }

    /// A definition with no further detail.
    pub fn define() -> Self {
        Self {
            mode: Mode::Define,
            ..Self::default()
        }
    }

    /// A definition of the given kind.
    pub fn define_as(subtype: impl Into<String>) -> Self {
        Self {
            mode: Mode::Define,
            subtype: Some(subtype.into()),
            definition_name: None,
        }
    }

    /// Attach the declared identifier.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.definition_name = Some(name.into());
        self
    }

    pub fn is_definition(&self) -> bool {
        self.mode == Mode::Define
    }
}
