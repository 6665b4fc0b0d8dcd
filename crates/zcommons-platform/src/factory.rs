//! Startup selection of the security platform variant.

use tracing::info;

use zcommons_contracts::{error::PlatformResult, platform::PlatformVariant};
use zcommons_core::{gateway::SecurityGateway, traits::SecurityPlatform};
use zcommons_host::HostPlatform;
use zcommons_stub::StubPlatform;

use crate::config::PlatformConfig;

/// Build the adapter `config` selects.
///
/// Selecting `real` off z/OS fails with `PlatformError::Unavailable`; there
/// is no silent fallback to the stub.
pub fn build_platform(config: &PlatformConfig) -> PlatformResult<Box<dyn SecurityPlatform>> {
    let platform: Box<dyn SecurityPlatform> = match config.mode() {
        PlatformVariant::Real => Box::new(HostPlatform::new()?),
        PlatformVariant::Stub => Box::new(StubPlatform::from_fixture(&config.stub)),
    };
    info!(variant = %platform.variant(), "security platform selected");
    Ok(platform)
}

/// Build a `SecurityGateway` over the adapter `config` selects.
pub fn build_gateway(config: &PlatformConfig) -> PlatformResult<SecurityGateway> {
    Ok(SecurityGateway::new(build_platform(config)?))
}
