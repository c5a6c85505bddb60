use std::fs::File;
use std::io::BufReader;
use std::path::{
    Path,
    PathBuf
};

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::codec::textcodec::DEFAULT_PRECISION;
use crate::math::function::analytic::exp::Exp;
use crate::math::function::analytic::log::Log;
use crate::math::function::analytic::trigonometric::{
    Cos,
    Sin
};
use crate::math::function::combinator::composition::Composition;
use crate::math::function::combinator::power::Power;
use crate::math::function::combinator::product::Product;
use crate::math::function::combinator::sum::Sum;
use crate::math::function::function::Function;
use crate::tabulated::pointstore::StorageKind;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid logarithm base {0}")]
    InvalidLogBase(f64),
}

/// 以 JSON 描述的函數樹，`type` 欄位決定種類。
///
/// ```json
/// { "type": "composition",
///   "outer": { "type": "log", "base": 2.718281828459045 },
///   "inner": { "type": "exp" } }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FunctionConfiguration {
    Exp,
    Log { base: f64 },
    Sin,
    Cos,
    Sum { lhs: Box<FunctionConfiguration>, rhs: Box<FunctionConfiguration> },
    Product { lhs: Box<FunctionConfiguration>, rhs: Box<FunctionConfiguration> },
    Power { base: Box<FunctionConfiguration>, exponent: f64 },
    Composition { outer: Box<FunctionConfiguration>, inner: Box<FunctionConfiguration> },
}

impl FunctionConfiguration {
    pub fn build(&self) -> Result<Box<dyn Function>, ConfigurationError> {
        let function: Box<dyn Function> = match self {
            FunctionConfiguration::Exp => Box::new(Exp::new()),
            FunctionConfiguration::Log { base } => {
                Box::new(Log::new(*base).ok_or(ConfigurationError::InvalidLogBase(*base))?)
            }
            FunctionConfiguration::Sin => Box::new(Sin),
            FunctionConfiguration::Cos => Box::new(Cos),
            FunctionConfiguration::Sum { lhs, rhs } => Box::new(Sum::new(lhs.build()?, rhs.build()?)),
            FunctionConfiguration::Product { lhs, rhs } => {
                Box::new(Product::new(lhs.build()?, rhs.build()?))
            }
            FunctionConfiguration::Power { base, exponent } => {
                Box::new(Power::new(base.build()?, *exponent))
            }
            FunctionConfiguration::Composition { outer, inner } => {
                Box::new(Composition::new(outer.build()?, inner.build()?))
            }
        };
        Ok(function)
    }
}

fn default_text_precision() -> usize {
    DEFAULT_PRECISION
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Configuration {
    function: FunctionConfiguration,
    left_x: f64,
    right_x: f64,
    points_count: usize,
    #[serde(default)]
    storage: StorageKind,
    #[serde(default = "default_text_precision")]
    text_precision: usize,
    output_folder: PathBuf,
}

impl Configuration {
    pub fn from_reader(file_path: &Path) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }

    pub fn from_json(json: &str) -> Result<Configuration, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn function(&self) -> &FunctionConfiguration {
        &self.function
    }

    pub fn left_x(&self) -> f64 {
        self.left_x
    }

    pub fn right_x(&self) -> f64 {
        self.right_x
    }

    pub fn points_count(&self) -> usize {
        self.points_count
    }

    pub fn storage(&self) -> StorageKind {
        self.storage
    }

    pub fn text_precision(&self) -> usize {
        self.text_precision
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }
}
