mod field_value;
mod input_mode;
mod inputs;
mod tier;

pub use field_value::{FieldValue, RawInput};
pub use input_mode::InputMode;
pub use inputs::{CalculatorInputs, EditError, InputField};
pub use tier::{MAX_TIERS, MIN_TIERS, Tier, TierEdit, TierField};
