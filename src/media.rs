//! Call descriptors for the `media.*` RPCs.
//!
//! These never touch the network. Pass the result to
//! [`Client::send`](crate::Client::send) or keep it for later.

use serde_json::{Map, Value};

use crate::builder;
use crate::errors::{DmCloudError, Result};
use crate::models::{CallDescriptor, Fields, ListOptions};

pub const CREATE: &str = "media.create";
pub const DELETE: &str = "media.delete";
pub const INFO: &str = "media.info";
pub const LIST: &str = "media.list";

/// Asset queried by `info` when none is named.
pub const DEFAULT_ASSET: &str = "source";

/// Field of an asset holding its signed download link.
pub const DOWNLOAD_URL_FIELD: &str = "download_url";

/// Create a media object.
///
/// With `url` the server fetches the file (http or ftp) and transcodes it to
/// each of `assets_names`. Without it an empty media is created; the API
/// expects `assets_names` to come with a url.
pub fn create(
    url: Option<&str>,
    assets_names: &[String],
    meta: &Map<String, Value>,
) -> Result<CallDescriptor> {
    Ok(CallDescriptor::new(
        CREATE,
        builder::create_args(url, assets_names, meta),
    ))
}

/// Delete a media object and all of its assets.
pub fn delete(media_id: &str) -> Result<CallDescriptor> {
    let media_id = require("media_id", media_id)?;
    Ok(CallDescriptor::new(DELETE, builder::delete_args(media_id)))
}

/// Information about a media object, restricted to `fields`.
///
/// `None` for `assets_names` means `["source"]`.
pub fn info(
    media_id: &str,
    assets_names: Option<&[String]>,
    fields: &Fields,
) -> Result<CallDescriptor> {
    let media_id = require("media_id", media_id)?;
    let default_assets = [DEFAULT_ASSET.to_string()];
    let assets_names = assets_names.unwrap_or(&default_assets[..]);
    Ok(CallDescriptor::new(
        INFO,
        builder::info_args(media_id, assets_names, fields),
    ))
}

/// A page of media info structures.
pub fn list(opts: &ListOptions) -> Result<CallDescriptor> {
    Ok(CallDescriptor::new(
        LIST,
        builder::list_args(opts.page, opts.per_page, &opts.fields),
    ))
}

/// `media.info` asking only for `asset_name`'s download link.
pub fn url(media_id: &str, asset_name: &str) -> Result<CallDescriptor> {
    let media_id = require("media_id", media_id)?;
    let asset_name = require("asset_name", asset_name)?;
    let assets_names = [asset_name.to_string()];
    info(
        media_id,
        Some(&assets_names[..]),
        &Fields::new().assets([DOWNLOAD_URL_FIELD]),
    )
}

fn require<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(DmCloudError::MissingParam(name))
    } else {
        Ok(value)
    }
}
