/// Inputs of one evaluation: the row's field value and the current instant.
///
/// Nothing else is ambient. Two evaluations with equal contexts produce
/// equal results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalCtx {
    /// Value substituted for `@currentField`.
    pub field_value: String,
    /// Value substituted for `@now`, in milliseconds since the Unix epoch.
    pub now_millis: i64,
}

impl EvalCtx {
    pub fn new(field_value: impl Into<String>, now_millis: i64) -> Self {
        EvalCtx {
            field_value: field_value.into(),
            now_millis,
        }
    }

    /// Context whose `@now` is read from the system clock.
    pub fn at_system_time(field_value: impl Into<String>) -> Self {
        Self::new(field_value, chrono::Utc::now().timestamp_millis())
    }

    /// Same instant, different field value.
    pub fn with_field(&self, field_value: impl Into<String>) -> Self {
        Self::new(field_value, self.now_millis)
    }
}
