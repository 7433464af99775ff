//! Version rules that pick builder images and client binaries.

/// Last OCP minor release whose client artifacts ship a single `oc` binary.
const LAST_PLAIN_OC_MINOR: u32 = 14;

/// First product minor release built on RHEL 9.
const FIRST_RHEL9_PRODUCT_MINOR: u64 = 35;

/// Builder images are published per Go `major.minor`; drop anything after.
///
/// `1.22.3` → `1.22`, while `1.22` and `1` are returned unchanged.
pub fn builder_go_version(version: &str) -> &str {
    match version.match_indices('.').nth(1) {
        Some((second_dot, _)) => &version[..second_dot],
        None => version,
    }
}

/// Minor component of an OCP version such as `4.14`.
pub fn ocp_minor(ocp_version: &str) -> crate::Result<u32> {
    let (_, minor) = ocp_version
        .split_once('.')
        .ok_or_else(|| crate::Error::InvalidVersion {
            version: ocp_version.to_owned(),
            reason: "expected <major>.<minor>",
        })?;
    minor.parse().map_err(|_| crate::Error::InvalidVersion {
        version: ocp_version.to_owned(),
        reason: "minor component is not a number",
    })
}

/// Name of the `oc` binary inside the OCP client artifacts image.
///
/// Up to OCP 4.14 the image ships a single `oc`; from 4.15 on it ships one
/// binary per RHEL release (`oc.rhel8`, `oc.rhel9`), chosen by the RHEL
/// release the product version is built on.
pub fn oc_binary_name(ocp_min: &str, product_version: &str) -> crate::Result<String> {
    if ocp_minor(ocp_min)? <= LAST_PLAIN_OC_MINOR {
        return Ok("oc".to_owned());
    }
    let rhel = rhel_for_product_version(product_version)?;
    Ok(format!("oc.rhel{rhel}"))
}

/// RHEL major release a product version is built on.
pub fn rhel_for_product_version(version: &str) -> crate::Result<u32> {
    let (major, minor, _patch) = parse_semver(version)?;
    match major {
        1 if minor < FIRST_RHEL9_PRODUCT_MINOR => Ok(8),
        1 => Ok(9),
        _ => Err(crate::Error::UnknownRhelMapping {
            version: version.to_owned(),
        }),
    }
}

/// Parse a strict `major.minor.patch` version, ignoring pre-release and
/// build metadata.
fn parse_semver(version: &str) -> crate::Result<(u64, u64, u64)> {
    let invalid = |reason| crate::Error::InvalidVersion {
        version: version.to_owned(),
        reason,
    };

    let core = version
        .split_once(['-', '+'])
        .map_or(version, |(core, _)| core);
    let mut parts = core.split('.');
    let mut next = || -> crate::Result<u64> {
        parts
            .next()
            .ok_or_else(|| invalid("expected <major>.<minor>.<patch>"))?
            .parse()
            .map_err(|_| invalid("version component is not a number"))
    };
    let triple = (next()?, next()?, next()?);
    if parts.next().is_some() {
        return Err(invalid("expected <major>.<minor>.<patch>"));
    }
    Ok(triple)
}
