#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightError {
    /// Adding `weight` to the running total `total` would exceed `u32::MAX`.
    /// For `modify`, `total` is the total minus the entry's prior weight.
    Overflow { total: u32, weight: u32 },
    /// Batch construction saw the element at input position `index` twice.
    Duplicate { index: usize },
}

impl std::fmt::Display for WeightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightError::Overflow { total, weight } => {
                write!(
                    f,
                    "adding weight {weight} to total weight {total} overflows u32"
                )
            }
            WeightError::Duplicate { index } => {
                write!(f, "duplicate element at entry index {index}")
            }
        }
    }
}

impl std::error::Error for WeightError {}
