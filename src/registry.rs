// registry.rs - Collation lookup and registration
//
// A `Registry` indexes the compiled collations by id and name and owns
// any collation registered from a `CollationDefinition`. It is built once
// with `Registry::init` and is read-only afterwards, apart from
// `add_collation`. Tailored collations build their weight tables the
// first time they are looked up.

use std::borrow::Cow;
use std::collections::HashMap;

use log::{debug, info, trace, warn};
use once_cell::sync::OnceCell;

use crate::charset::CharsetInfo;
use crate::charsets::{find_charset, ALL_CHARSETS};
use crate::collation::uca::UCA_HANDLER;
use crate::collation::CollationInfo;
use crate::compiled::ALL_COLLATIONS;
use crate::ctype::{
    CharsetState, MAX_BMP, PAGE2_COLLATION_ID_8BIT, PAGE2_COLLATION_ID_SIZE, PAGE2_COLLATION_ID_UCS2,
    PAGE2_COLLATION_ID_UTF16, PAGE2_COLLATION_ID_UTF16LE, PAGE2_COLLATION_ID_UTF32, PAGE2_COLLATION_ID_UTF8MB3,
    PAGE2_COLLATION_ID_UTF8MB4,
};
use crate::error::CollationError;
use crate::uca::rules::parse_rules;
use crate::uca::UcaVersion;

pub const DEFAULT_COLLATION: &str = "utf8mb4_general_ci";

// === CollationDefinition ===

/// A UCA tailoring handed over by an external loader.
///
/// # Examples
///
/// ```
/// use ferrocoll::registry::{CollationDefinition, Registry, RegistryConfig};
///
/// let def = CollationDefinition::new("utf8mb4_x_ci", 0x260, "utf8mb4", "&a < x");
/// let registry = Registry::init(RegistryConfig::new().definition(def)).unwrap();
/// let cl = registry.get_by_name("utf8mb4_x_ci").unwrap();
/// assert!(cl.strnncoll(b"x", b"b", false) < 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationDefinition {
    pub name: String,
    pub id: u32,
    pub charset: String,
    /// Tailoring rules applied on top of the base table.
    pub rules: String,
    /// Base table; a `[version]` setting in the rules wins.
    pub version: UcaVersion,
}

impl CollationDefinition {
    pub fn new(name: &str, id: u32, charset: &str, rules: &str) -> Self {
        CollationDefinition {
            name: name.to_string(),
            id,
            charset: charset.to_string(),
            rules: rules.to_string(),
            version: UcaVersion::V400,
        }
    }

    pub fn version(mut self, version: UcaVersion) -> Self {
        self.version = version;
        self
    }
}

// === RegistryConfig ===

/// Options for [`Registry::init`].
///
/// # Examples
///
/// ```
/// use ferrocoll::registry::{Registry, RegistryConfig};
///
/// let registry = Registry::init(
///     RegistryConfig::new()
///         .default_collation("latin1_swedish_ci")
///         .preload_tailored(true),
/// )
/// .unwrap();
/// assert_eq!(registry.get_default().number, 8);
/// ```
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub default_collation: String,
    /// Build every compiled tailored table during `init` instead of on
    /// first use. Definitions are always built when registered.
    pub preload_tailored: bool,
    pub definitions: Vec<CollationDefinition>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            default_collation: DEFAULT_COLLATION.to_string(),
            preload_tailored: false,
            definitions: Vec::new(),
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_collation(mut self, name: &str) -> Self {
        self.default_collation = name.to_string();
        self
    }

    pub fn preload_tailored(mut self, yes: bool) -> Self {
        self.preload_tailored = yes;
        self
    }

    pub fn definition(mut self, def: CollationDefinition) -> Self {
        self.definitions.push(def);
        self
    }
}

// === Registry ===

#[derive(Debug, Clone, Copy)]
enum Entry {
    Compiled(&'static CollationInfo),
    Loaded(usize),
}

/// Index of every known collation.
pub struct Registry {
    by_id: HashMap<u32, Entry>,
    by_name: HashMap<String, Entry>,
    loaded: Vec<Box<CollationInfo>>,
    default: Entry,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("collations", &self.by_id.len())
            .field("loaded", &self.loaded.len())
            .field("default", &self.get_default().name)
            .finish()
    }
}

/// Lookup key for a collation name. `utf8_` is an alias of `utf8mb3_`.
fn name_key(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.strip_prefix("utf8_") {
        Some(rest) => format!("utf8mb3_{}", rest),
        None => lower,
    }
}

/// First id of the page reserved for loaded collations of `cs`.
fn id_page(cs: &CharsetInfo) -> Option<u32> {
    let start = match cs.name {
        "utf8mb3" => PAGE2_COLLATION_ID_UTF8MB3,
        "utf8mb4" => PAGE2_COLLATION_ID_UTF8MB4,
        "ucs2" => PAGE2_COLLATION_ID_UCS2,
        "utf16" => PAGE2_COLLATION_ID_UTF16,
        "utf16le" => PAGE2_COLLATION_ID_UTF16LE,
        "utf32" => PAGE2_COLLATION_ID_UTF32,
        "binary" => return None,
        _ if cs.is_8bit() => PAGE2_COLLATION_ID_8BIT,
        _ => return None,
    };
    Some(start)
}

impl Registry {
    /// Indexes the compiled collations, registers `config.definitions`
    /// and resolves the default collation.
    pub fn init(config: RegistryConfig) -> Result<Registry, CollationError> {
        let mut by_id = HashMap::with_capacity(ALL_COLLATIONS.len());
        let mut by_name = HashMap::with_capacity(ALL_COLLATIONS.len());
        for &cl in ALL_COLLATIONS.iter() {
            by_id.insert(cl.number, Entry::Compiled(cl));
            by_name.insert(name_key(&cl.name), Entry::Compiled(cl));
        }
        let mut registry = Registry {
            by_id,
            by_name,
            loaded: Vec::new(),
            default: Entry::Compiled(ALL_COLLATIONS[0]),
        };

        for def in config.definitions {
            registry.add_collation(def)?;
        }
        registry.default = registry.entry_by_name(&config.default_collation)?;

        if config.preload_tailored {
            for &cl in ALL_COLLATIONS.iter().filter(|cl| cl.tailoring.is_some()) {
                cl.init()?;
            }
        }
        info!(
            "collation registry ready: {} charsets, {} collations ({} loaded), default {}",
            ALL_CHARSETS.len(),
            registry.by_id.len(),
            registry.loaded.len(),
            registry.get_default().name
        );
        Ok(registry)
    }

    fn resolve(&self, entry: Entry) -> &CollationInfo {
        match entry {
            Entry::Compiled(cl) => cl,
            Entry::Loaded(i) => &self.loaded[i],
        }
    }

    fn entry_by_name(&self, name: &str) -> Result<Entry, CollationError> {
        self.by_name
            .get(&name_key(name))
            .copied()
            .ok_or_else(|| CollationError::UnknownCollation(name.to_string()))
    }

    /// Resolves `entry`, building its tailored tables if needed.
    fn ready(&self, entry: Entry) -> Result<&CollationInfo, CollationError> {
        let cl = self.resolve(entry);
        cl.init()?;
        Ok(cl)
    }

    pub fn get_by_id(&self, id: u32) -> Result<&CollationInfo, CollationError> {
        let entry = self.by_id.get(&id).copied().ok_or(CollationError::UnknownCollationId(id))?;
        self.ready(entry)
    }

    /// Case-insensitive lookup.
    pub fn get_by_name(&self, name: &str) -> Result<&CollationInfo, CollationError> {
        let entry = self.entry_by_name(name)?;
        self.ready(entry)
    }

    /// The collation named by `RegistryConfig::default_collation`. Its
    /// tables are built on first use.
    pub fn get_default(&self) -> &CollationInfo {
        self.resolve(self.default)
    }

    pub fn charset_by_name(&self, name: &str) -> Result<&'static CharsetInfo, CollationError> {
        find_charset(name).ok_or_else(|| CollationError::UnknownCharset(name.to_string()))
    }

    /// The `_bin` or primary collation of a charset.
    pub fn default_for_charset(&self, charset: &str, binary: bool) -> Result<&CollationInfo, CollationError> {
        let cs = self.charset_by_name(charset)?;
        let state = if binary { CharsetState::BINSORT } else { CharsetState::PRIMARY };
        ALL_COLLATIONS
            .iter()
            .copied()
            .find(|cl| std::ptr::eq(cl.charset, cs) && cl.state.contains(state) && !cl.is_nopad())
            .or_else(|| ALL_COLLATIONS.iter().copied().find(|cl| std::ptr::eq(cl.charset, cs)))
            .ok_or_else(|| CollationError::UnknownCollation(charset.to_string()))
    }

    /// Every registered collation, ordered by id.
    pub fn collations(&self) -> Vec<&CollationInfo> {
        let mut all: Vec<&CollationInfo> = self.by_id.values().map(|&e| self.resolve(e)).collect();
        all.sort_by_key(|cl| cl.number);
        all
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Registers a UCA tailoring. The id must lie in the 32-id page
    /// reserved for the charset, and neither id nor name may be taken.
    /// Returns the id.
    pub fn add_collation(&mut self, def: CollationDefinition) -> Result<u32, CollationError> {
        match self.try_add(&def) {
            Ok(id) => Ok(id),
            Err(e) => {
                warn!("rejected collation definition {} (id {}): {}", def.name, def.id, e);
                Err(e)
            }
        }
    }

    fn try_add(&mut self, def: &CollationDefinition) -> Result<u32, CollationError> {
        let cs = self.charset_by_name(&def.charset)?;
        let page = id_page(cs).ok_or_else(|| CollationError::IdOutOfRange {
            id: def.id,
            charset: cs.name.to_string(),
        })?;
        if !(page..page + PAGE2_COLLATION_ID_SIZE).contains(&def.id) {
            return Err(CollationError::IdOutOfRange { id: def.id, charset: cs.name.to_string() });
        }
        let key = name_key(&def.name);
        if self.by_id.contains_key(&def.id) || self.by_name.contains_key(&key) {
            return Err(CollationError::DuplicateCollation { id: def.id, name: def.name.clone() });
        }

        let set = parse_rules(&def.rules).map_err(|e| CollationError::RuleSyntax {
            collation: def.name.clone(),
            position: e.position,
            message: e.message,
        })?;
        let version = set.settings.version.unwrap_or(def.version);
        let levels = set.settings.strength.unwrap_or(1);
        trace!("{}: {} rules, strength {}, UCA {}", def.name, set.rules.len(), levels, version.name());

        let binary_number = self.default_for_charset(cs.name, true).map_or(def.id, |cl| cl.number);
        let max_sort_char = if cs.mbmaxlen >= 4 { version.maxchar() } else { MAX_BMP };
        let cl = CollationInfo {
            number: def.id,
            primary_number: def.id,
            binary_number,
            state: CharsetState::LOADED.union(CharsetState::UNICODE).union(CharsetState::STRNXFRM),
            name: Cow::Owned(def.name.clone()),
            comment: "",
            charset: cs,
            sort_order: None,
            uca: Some(version.table()),
            tailoring: Some(Cow::Owned(def.rules.clone())),
            strxfrm_multiply: 8,
            min_sort_char: 0x09,
            max_sort_char,
            levels_for_order: levels,
            handler: &UCA_HANDLER,
            tailored: OnceCell::new(),
        };
        // Rules that parse may still fail to apply.
        cl.init()?;

        let entry = Entry::Loaded(self.loaded.len());
        self.loaded.push(Box::new(cl));
        self.by_id.insert(def.id, entry);
        self.by_name.insert(key, entry);
        Ok(def.id)
    }

    /// Releases every loaded collation. Compiled tables live on.
    pub fn shutdown(self) {
        debug!(
            "collation registry shut down: {} collations, {} loaded",
            self.by_id.len(),
            self.loaded.len()
        );
    }
}
