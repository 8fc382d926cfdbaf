use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The serializable request shape sent to the API.
///
/// Serializes as `{ "call": ..., "params": { "call": ..., "args": {...} } }`.
/// Only `params` goes over the wire; `call` is kept alongside for routing and logging.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CallDescriptor {
    /// e.g. "media.create".
    pub call: String,
    pub params: CallParams,
}

/// Body of an RPC call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CallParams {
    pub call: String,
    pub args: Map<String, Value>,
}

impl CallDescriptor {
    /// Wrap `args` for `call`, naming the call in both places.
    pub fn new(call: impl Into<String>, args: Map<String, Value>) -> Self {
        let call = call.into();
        Self {
            params: CallParams {
                call: call.clone(),
                args,
            },
            call,
        }
    }

    /// Shortcut for `params.args`.
    pub fn args(&self) -> &Map<String, Value> {
        &self.params.args
    }
}

/// Outcome of [`Client::dispatch`](crate::Client::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// `auto_call` was on: the call went out and this is the parsed response.
    Sent(Value),
    /// `auto_call` was off: the descriptor is handed back for the caller to send.
    Deferred(CallDescriptor),
}

impl Dispatched {
    /// The parsed response, if the call was sent.
    pub fn into_response(self) -> Option<Value> {
        match self {
            Dispatched::Sent(v) => Some(v),
            Dispatched::Deferred(_) => None,
        }
    }

    /// The untouched descriptor, if the call was deferred.
    pub fn into_descriptor(self) -> Option<CallDescriptor> {
        match self {
            Dispatched::Sent(_) => None,
            Dispatched::Deferred(d) => Some(d),
        }
    }
}

/// A selection of fields to retrieve from `media.info` / `media.list`.
///
/// Plain fields are sent verbatim. Grouped fields are sent as `group.field`,
/// except the `assets` group which is expanded per asset name into
/// `assets.<asset>.<field>`.
///
/// ```
/// use dmcloud::Fields;
///
/// let fields = Fields::new()
///     .field("id")
///     .group("meta", ["title", "author"])
///     .assets(["download_url"]);
/// assert!(!fields.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pub plain: Vec<String>,
    pub groups: BTreeMap<String, Vec<String>>,
}

impl Fields {
    pub const ASSETS: &'static str = "assets";

    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level field such as `id` or `created`.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.plain.push(name.into());
        self
    }

    /// Add fields under `group`, sent as `group.name`.
    pub fn group<I, S>(mut self, group: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .entry(group.into())
            .or_default()
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Fields of each requested asset, e.g. `download_url`.
    pub fn assets<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group(Self::ASSETS, names)
    }

    /// `true` when no field at all is selected.
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.groups.values().all(Vec::is_empty)
    }
}

/// Pagination for `media.list`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// 1-based.
    pub page: u32,
    pub per_page: u32,
    pub fields: Fields,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            fields: Fields::default(),
        }
    }
}
