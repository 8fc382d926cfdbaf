//! Pure shaping of caller arguments into the `args` object of each call.
//!
//! Nothing here validates identifiers; see [`crate::media`] for that.

use serde_json::{json, Map, Value};

use crate::models::Fields;

/// `media.create` arguments. Empty pieces are left out of the payload.
pub fn create_args(
    url: Option<&str>,
    assets_names: &[String],
    meta: &Map<String, Value>,
) -> Map<String, Value> {
    let mut args = Map::new();
    if let Some(url) = url {
        args.insert("url".into(), json!(url));
    }
    if !assets_names.is_empty() {
        args.insert("assets_names".into(), json!(assets_names));
    }
    if !meta.is_empty() {
        args.insert("meta".into(), Value::Object(meta.clone()));
    }
    args
}

/// `media.delete` arguments: just the id.
pub fn delete_args(media_id: &str) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("id".into(), json!(media_id));
    args
}

/// `media.info` arguments. The `assets` group of `fields` is expanded against `assets_names`.
pub fn info_args(media_id: &str, assets_names: &[String], fields: &Fields) -> Map<String, Value> {
    let mut args = delete_args(media_id);
    let fields = flatten_fields(fields, assets_names);
    if !fields.is_empty() {
        args.insert("fields".into(), json!(fields));
    }
    args
}

/// `media.list` arguments. With no fields the API returns everything.
pub fn list_args(page: u32, per_page: u32, fields: &Fields) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("page".into(), json!(page));
    args.insert("per_page".into(), json!(per_page));
    let fields = flatten_fields(fields, &[]);
    if !fields.is_empty() {
        args.insert("fields".into(), json!(fields));
    }
    args
}

/// Turn a [`Fields`] selection into dotted paths, in insertion order for plain
/// fields then group order, without duplicates.
///
/// When `assets_names` is empty the `assets` group is flattened like any other
/// group (`assets.<field>`).
pub fn flatten_fields(fields: &Fields, assets_names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |path: String| {
        if !out.contains(&path) {
            out.push(path);
        }
    };

    for name in &fields.plain {
        push(name.clone());
    }

    for (group, names) in &fields.groups {
        if group == Fields::ASSETS && !assets_names.is_empty() {
            for asset in assets_names {
                for name in names {
                    push(format!("{group}.{asset}.{name}"));
                }
            }
        } else {
            for name in names {
                push(format!("{group}.{name}"));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn create_includes_url_and_assets() {
        let args = create_args(
            Some("http://example.com/a.mov"),
            &names(&["mp4_h264_aac", "jpeg_thumbnail_medium"]),
            &Map::new(),
        );
        assert_eq!(args["url"], "http://example.com/a.mov");
        assert_eq!(args["assets_names"], json!(["mp4_h264_aac", "jpeg_thumbnail_medium"]));
        assert!(!args.contains_key("meta"));
    }

    #[test]
    fn create_empty_media() {
        assert!(create_args(None, &[], &Map::new()).is_empty());
    }

    #[test]
    fn create_passes_meta_through() {
        let mut meta = Map::new();
        meta.insert("title".into(), json!("Holiday"));
        meta.insert("author".into(), json!("Sam"));
        let args = create_args(Some("ftp://h/f.avi"), &[], &meta);
        assert_eq!(args["meta"], json!({"title": "Holiday", "author": "Sam"}));
    }

    #[test]
    fn info_expands_asset_fields() {
        let fields = Fields::new()
            .field("id")
            .group("meta", ["title"])
            .assets(["download_url", "status"]);
        let args = info_args("abc", &names(&["source", "mp4"]), &fields);
        assert_eq!(args["id"], "abc");
        assert_eq!(
            args["fields"],
            json!([
                "id",
                "assets.source.download_url",
                "assets.source.status",
                "assets.mp4.download_url",
                "assets.mp4.status",
                "meta.title"
            ])
        );
    }

    #[test]
    fn info_without_fields_omits_key() {
        let args = info_args("abc", &names(&["source"]), &Fields::new());
        assert!(!args.contains_key("fields"));
    }

    #[test]
    fn list_carries_pagination() {
        let args = list_args(2, 5, &Fields::new());
        assert_eq!(args["page"], 2);
        assert_eq!(args["per_page"], 5);
        assert!(!args.contains_key("fields"));
    }

    #[test]
    fn flatten_dedups() {
        let fields = Fields::new().field("id").field("id").group("meta", ["title", "title"]);
        assert_eq!(flatten_fields(&fields, &[]), vec!["id", "meta.title"]);
    }

    #[test]
    fn flatten_assets_without_names() {
        let fields = Fields::new().assets(["download_url"]);
        assert_eq!(flatten_fields(&fields, &[]), vec!["assets.download_url"]);
    }
}
