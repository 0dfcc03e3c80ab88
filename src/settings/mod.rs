//! Buffer settings
//! Declarative descriptors for changing `BufferOptions` by name

use crate::buffer::line_ending::LineEnding;
use crate::constants;
use crate::error::{ErrorType, GapError};

/// Tunables for a single buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferOptions {
    /// Minimum number of bytes added to the backing store when the gap runs out
    pub grow_amount: usize,
    /// Maximum number of undo records retained
    pub history_limit: usize,
    /// Line ending used for buffers that start empty
    pub default_line_ending: LineEnding,
}

impl Default for BufferOptions {
    fn default() -> Self {
        BufferOptions {
            grow_amount: constants::buffer::GROW_AMOUNT,
            history_limit: constants::history::DEFAULT_LIMIT,
            default_line_ending: LineEnding::Lf,
        }
    }
}

/// Typed value after parsing and validation
/// Setters receive this, never raw strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    /// Integer value
    Integer(usize),
    /// Enum value (canonicalized identifier)
    Enum(String),
}

/// Setting type definition for parsing and validation
#[derive(Debug, Clone)]
pub enum SettingType {
    /// Integer setting with optional min/max bounds
    Integer {
        /// Minimum value (inclusive)
        min: Option<usize>,
        /// Maximum value (inclusive)
        max: Option<usize>,
    },
    /// Enum setting with static variant list
    Enum {
        /// Valid enum variants
        variants: &'static [&'static str],
    },
}

/// Structured error for setting operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    /// Failed to parse string value
    ParseError(String),
    /// Value failed validation (out of range, etc.)
    ValidationError(String),
    /// Unknown option name
    UnknownOption(String),
}

impl std::fmt::Display for SettingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            SettingError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            SettingError::UnknownOption(name) => write!(f, "Unknown option: {name}"),
        }
    }
}

impl std::error::Error for SettingError {}

impl From<SettingError> for GapError {
    fn from(err: SettingError) -> Self {
        use constants::errors;
        match err {
            SettingError::ParseError(msg) => {
                GapError::new(ErrorType::Settings, errors::SETTING_PARSE_ERROR, msg)
            }
            SettingError::ValidationError(msg) => {
                GapError::new(ErrorType::Settings, errors::SETTING_VALIDATION_ERROR, msg)
            }
            SettingError::UnknownOption(name) => GapError::new(
                ErrorType::Settings,
                errors::UNKNOWN_OPTION,
                format!("Unknown option: {name}"),
            ),
        }
    }
}

/// Setter function signature
pub type SettingSetter<T> = fn(&mut T, SettingValue) -> Result<(), SettingError>;

/// Setting descriptor: name, aliases, type, and setter function
#[derive(Debug, Clone)]
pub struct SettingDescriptor<T: 'static> {
    /// Canonical setting name
    pub name: &'static str,
    /// Short aliases (e.g., &["ul"])
    pub aliases: &'static [&'static str],
    /// Setting type for parsing and validation
    pub ty: SettingType,
    /// Setter function pointer
    pub set: SettingSetter<T>,
}

/// Registry over a static table of descriptors
#[derive(Debug, Clone)]
pub struct SettingsRegistry<T: 'static> {
    settings: &'static [SettingDescriptor<T>],
}

impl<T> SettingsRegistry<T> {
    #[must_use]
    pub const fn new(descriptors: &'static [SettingDescriptor<T>]) -> Self {
        SettingsRegistry {
            settings: descriptors,
        }
    }

    /// Look up a descriptor by canonical name or alias
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&'static SettingDescriptor<T>> {
        let settings = self.settings;
        settings
            .iter()
            .find(|d| d.name == name || d.aliases.iter().any(|a| *a == name))
    }

    /// Canonical names of every registered setting
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let settings = self.settings;
        settings.iter().map(|d| d.name)
    }

    /// Parse `value` according to the setting named `name` and apply it
    pub fn set(&self, target: &mut T, name: &str, value: &str) -> Result<(), SettingError> {
        let desc = self
            .find(name)
            .ok_or_else(|| SettingError::UnknownOption(name.to_string()))?;
        let parsed = parse_value(&desc.ty, value)?;
        (desc.set)(target, parsed)
    }

    /// Apply a `name=value` assignment
    pub fn apply_assignment(&self, target: &mut T, assignment: &str) -> Result<(), SettingError> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            SettingError::ParseError(format!("Missing value: expected name=value, got {assignment}"))
        })?;
        self.set(target, name.trim(), value)
    }
}

/// Parse a raw string into a `SettingValue` using `SettingType`
pub(crate) fn parse_value(ty: &SettingType, value: &str) -> Result<SettingValue, SettingError> {
    match ty {
        SettingType::Integer { min, max } => {
            let val = value
                .trim()
                .parse::<usize>()
                .map_err(|_| SettingError::ParseError(format!("Invalid integer value: {value}")))?;

            if let Some(min_val) = min {
                if val < *min_val {
                    return Err(SettingError::ValidationError(format!(
                        "Value {val} is below minimum {min_val}"
                    )));
                }
            }
            if let Some(max_val) = max {
                if val > *max_val {
                    return Err(SettingError::ValidationError(format!(
                        "Value {val} is above maximum {max_val}"
                    )));
                }
            }
            Ok(SettingValue::Integer(val))
        }
        SettingType::Enum { variants } => {
            let val_lower = value.trim().to_lowercase();
            if let Some(canonical) = variants.iter().find(|v| v.to_lowercase() == val_lower) {
                Ok(SettingValue::Enum((*canonical).to_string()))
            } else {
                Err(SettingError::ParseError(format!(
                    "Invalid enum value: {value}. Valid values: {variants:?}"
                )))
            }
        }
    }
}

fn set_grow_amount(options: &mut BufferOptions, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Integer(n) => {
            options.grow_amount = n;
            Ok(())
        }
        _ => Err(SettingError::ValidationError(
            "Expected integer value for grow_amount".to_string(),
        )),
    }
}

fn set_history_limit(options: &mut BufferOptions, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Integer(n) => {
            options.history_limit = n;
            Ok(())
        }
        _ => Err(SettingError::ValidationError(
            "Expected integer value for history_limit".to_string(),
        )),
    }
}

/// Parse a line ending name as used by the `line_ending` setting
pub fn parse_line_ending(s: &str) -> Result<LineEnding, SettingError> {
    match s.to_lowercase().as_str() {
        "lf" | "unix" => Ok(LineEnding::Lf),
        "crlf" | "dos" | "windows" => Ok(LineEnding::Crlf),
        "cr" | "mac" => Ok(LineEnding::Cr),
        _ => Err(SettingError::ValidationError(format!(
            "Invalid line ending: {s}. Expected 'lf', 'crlf' or 'cr'"
        ))),
    }
}

fn set_line_ending(options: &mut BufferOptions, value: SettingValue) -> Result<(), SettingError> {
    match value {
        SettingValue::Enum(s) => {
            options.default_line_ending = parse_line_ending(&s)?;
            Ok(())
        }
        _ => Err(SettingError::ValidationError(
            "Expected enum value for line ending".to_string(),
        )),
    }
}

const BUFFER_SETTINGS: &[SettingDescriptor<BufferOptions>] = &[
    SettingDescriptor {
        name: "grow_amount",
        aliases: &["ga"],
        ty: SettingType::Integer {
            min: Some(1),
            max: None,
        },
        set: set_grow_amount,
    },
    SettingDescriptor {
        name: "history_limit",
        aliases: &["ul", "undolevels"],
        ty: SettingType::Integer {
            min: Some(1),
            max: None,
        },
        set: set_history_limit,
    },
    SettingDescriptor {
        name: "line_ending",
        aliases: &["ff", "fileformat"],
        ty: SettingType::Enum {
            variants: &["lf", "unix", "crlf", "dos", "windows", "cr", "mac"],
        },
        set: set_line_ending,
    },
];

#[must_use]
pub fn create_buffer_settings_registry() -> SettingsRegistry<BufferOptions> {
    SettingsRegistry::new(BUFFER_SETTINGS)
}
