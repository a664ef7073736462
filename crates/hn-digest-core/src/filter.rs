//! Domain blacklist and title allow-list filters.
//!
//! Both filters are compiled once per run from configuration:
//!
//! - [`BlacklistSet`] — exact match on the url host, after both sides are
//!   put in the form `Url::host_str` yields (lowercase, punycode, no
//!   trailing dot).
//! - [`FilterRule`] — a regex over the item title. A title passes when
//!   any rule matches; an empty rule list lets everything through.
//!
//! [`FilterEngine`] bundles both and decides the fate of one [`Item`].

use std::collections::HashSet;

use regex::Regex;
use serde::Deserialize;
use url::{Host, Url};

use crate::error::{Error, Result};
use crate::models::Item;

/// A `{title, value}` entry from the `filters` configuration list.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FilterPattern {
    /// Human label for the rule.
    #[serde(rename = "title")]
    pub label: String,
    /// Regular expression matched against item titles.
    #[serde(rename = "value")]
    pub pattern: String,
}

/// Normalized hostnames whose items must never be persisted.
#[derive(Debug, Clone, Default)]
pub struct BlacklistSet {
    hosts: HashSet<String>,
}

impl BlacklistSet {
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn contains_host(&self, host: &str) -> bool {
        normalize_host(host).is_some_and(|h| self.hosts.contains(&h))
    }
}

/// Lowercase, IDNA-encode and drop one trailing dot, so `BÜCHER.de.` and
/// `xn--bcher-kva.de` compare equal. Blank input yields `None`.
fn normalize_host(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let host = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if host.is_empty() {
        return None;
    }
    match Host::parse(host) {
        Ok(parsed) => Some(parsed.to_string()),
        Err(_) => Some(host.to_lowercase()),
    }
}

/// A compiled title pattern.
#[derive(Debug, Clone)]
pub struct FilterRule {
    pub label: String,
    regex: Regex,
}

impl FilterRule {
    pub fn is_match(&self, title: &str) -> bool {
        self.regex.is_match(title)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

pub fn build_blacklist<S: AsRef<str>>(domains: &[S]) -> BlacklistSet {
    let hosts = domains
        .iter()
        .filter_map(|d| normalize_host(d.as_ref()))
        .collect();
    BlacklistSet { hosts }
}

/// Compile every pattern. A single invalid pattern fails the whole build.
pub fn build_rules(patterns: &[FilterPattern]) -> Result<Vec<FilterRule>> {
    patterns
        .iter()
        .map(|p| {
            let regex = Regex::new(&p.pattern).map_err(|e| {
                Error::configuration(format!(
                    "invalid filter pattern '{}' for rule '{}': {}",
                    p.pattern, p.label, e
                ))
            })?;
            Ok(FilterRule {
                label: p.label.clone(),
                regex,
            })
        })
        .collect()
}

/// True when the item's url host is in the blacklist.
///
/// Urls that fail to parse, or have no host, are not blacklisted here.
pub fn is_blacklisted(item: &Item, blacklist: &BlacklistSet) -> bool {
    match Url::parse(&item.url) {
        Ok(url) => url
            .host_str()
            .map(|host| blacklist.contains_host(host))
            .unwrap_or(false),
        Err(_) => false,
    }
}

pub fn passes_rules(item: &Item, rules: &[FilterRule]) -> bool {
    rules.is_empty() || rules.iter().any(|r| r.is_match(&item.title))
}

/// Why an item was kept or dropped by [`FilterEngine::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Blacklisted,
    NoRuleMatched,
}

/// Blacklist and rules built once per run.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    blacklist: BlacklistSet,
    rules: Vec<FilterRule>,
}

impl FilterEngine {
    pub fn new(blacklist: BlacklistSet, rules: Vec<FilterRule>) -> Self {
        Self { blacklist, rules }
    }

    pub fn from_config<S: AsRef<str>>(domains: &[S], patterns: &[FilterPattern]) -> Result<Self> {
        Ok(Self::new(build_blacklist(domains), build_rules(patterns)?))
    }

    pub fn blacklist(&self) -> &BlacklistSet {
        &self.blacklist
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// Blacklist first, then rules. Empty stages are skipped.
    pub fn check(&self, item: &Item) -> Verdict {
        if !self.blacklist.is_empty() && is_blacklisted(item, &self.blacklist) {
            return Verdict::Blacklisted;
        }
        if !self.rules.is_empty() && !passes_rules(item, &self.rules) {
            return Verdict::NoRuleMatched;
        }
        Verdict::Keep
    }
}
