//! JSON response envelope for conversion results.

use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::document::Mapping;
use crate::error::Result;

use super::{Conversion, ConversionStats};

/// Outcome of a conversion in the shape web front ends expect:
/// `{ "success": true, "data": ..., "stats": ... }` or
/// `{ "success": false, "error": "..." }`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success {
        success: bool,
        data: Mapping,
        stats: ConversionStats,
        #[serde(skip_serializing_if = "Diagnostics::is_empty")]
        diagnostics: Diagnostics,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl Response {
    pub fn success(conversion: Conversion) -> Self {
        Response::Success {
            success: true,
            data: conversion.document,
            stats: conversion.stats,
            diagnostics: conversion.diagnostics,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Response::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    /// Wrap a conversion result, keeping only the message of an error.
    pub fn from_result(result: Result<Conversion>) -> Self {
        match result {
            Ok(conversion) => Self::success(conversion),
            Err(err) => Self::failure(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
