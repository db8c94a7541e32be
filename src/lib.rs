//! Core library for the ftc-scout-export service.
//!
//! The library collects per-alliance match scores for a list of FTC teams,
//! flattens them into uniform records and exports the result as an Excel
//! workbook. IO adapters live under [`ftc::scout::io`], data representations
//! inside [`ftc::scout::model`], the row shaping logic in
//! [`ftc::scout::format`], and the HTTP surface under [`ftc::scout::server`].

pub mod ftc;

pub use ftc::scout::{
    Result, ScoutError, config, error, export, fetch, format, ingest, io, logging, model,
    normalize, server,
};
