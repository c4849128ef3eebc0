/// Segments and ROH regions are significant when their quality-derived p-value is below this value
pub const DEFAULT_MAX_P_VALUE: f64 = 0.05;

/// Copy number of the normal diploid state
pub const NORMAL_COPY_NUMBER: i32 = 2;

/// Copy number highlighted as copy-loss LoH in the visualization overlay
pub const COPY_LOSS_COPY_NUMBER: i32 = 1;
