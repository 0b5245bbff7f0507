//! Service client plugins
//!
//! Provider factories only talk to the narrow client traits defined here, so
//! tests can substitute fakes for the AWS SDK.

pub mod aws_v2;
