pub mod auto_key;
pub mod classifier;
pub mod composite;
pub mod distance;
pub mod mask;
pub mod threshold_key;
