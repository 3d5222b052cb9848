//! Built-in scaler and classifier formats

pub mod forest;
pub mod logistic;
pub mod scaler;

pub use forest::{DecisionTree, RandomForest};
pub use logistic::{sigmoid, LogisticRegression};
pub use scaler::{MinMaxScaler, StandardScaler};
