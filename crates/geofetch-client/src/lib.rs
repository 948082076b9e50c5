//! HTTP client for interacting with ArcGIS-style feature services.
//!
//! This crate wraps the three REST calls the downloader needs: enumerating
//! every object ID, probing the service's advertised `maxRecordCount`, and
//! fetching one contiguous object-ID range of features. The ranged call is
//! exposed behind the [`QueryService`] trait so the download loop can be
//! driven by scripted responses in tests.

mod client;

pub use client::{FeatureServiceClient, FeatureServiceConfig, QueryService};
