//! Request shapes as the host visualization tool hands them over.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parameter that may arrive either as a scalar or wrapped in a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param<T> {
    Scalar(T),
    List(Vec<T>),
}

impl<T> Param<T> {
    /// Unwraps to a scalar. A list yields its first element; an empty list is an error.
    pub fn as_scalar(&self, name: &'static str) -> Result<&T> {
        match self {
            Self::Scalar(v) => Ok(v),
            Self::List(values) => values.first().ok_or(Error::EmptyParameter { name }),
        }
    }
}

impl<T> From<T> for Param<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Param<String> {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

/// Graph-discipline request: three parallel columns plus scalar parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRequest {
    pub from_nodes: Vec<Option<String>>,
    pub to_nodes: Vec<Option<String>>,
    pub roles: Vec<String>,
    pub dimension: Param<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Param<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<Param<f64>>,
}

impl GraphRequest {
    pub fn new<F, T, R>(from_nodes: F, to_nodes: T, roles: R, dimension: &str) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            from_nodes: from_nodes.into_iter().map(|v| Some(v.into())).collect(),
            to_nodes: to_nodes.into_iter().map(|v| Some(v.into())).collect(),
            roles: roles.into_iter().map(Into::into).collect(),
            dimension: dimension.into(),
            layout: None,
            k: None,
        }
    }

    pub fn with_layout(mut self, layout: &str) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = Some(k.into());
        self
    }

    pub fn with_dimension(mut self, dimension: &str) -> Self {
        self.dimension = dimension.into();
        self
    }

    pub fn len(&self) -> usize {
        self.from_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_nodes.is_empty()
    }
}

/// Radar-discipline request: four parallel columns plus the dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarRequest {
    pub data: Vec<String>,
    pub amplitude: Vec<String>,
    pub thread: Vec<String>,
    pub node_type: Vec<String>,
    pub dimension: Param<String>,
}

impl RadarRequest {
    pub fn new<I>(data: I, amplitude: I, thread: I, node_type: I, dimension: &str) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        fn collect<I>(values: I) -> Vec<String>
        where
            I: IntoIterator,
            I::Item: Into<String>,
        {
            values.into_iter().map(Into::into).collect()
        }

        Self {
            data: collect(data),
            amplitude: collect(amplitude),
            thread: collect(thread),
            node_type: collect(node_type),
            dimension: dimension.into(),
        }
    }

    pub fn with_dimension(mut self, dimension: &str) -> Self {
        self.dimension = dimension.into();
        self
    }
}
