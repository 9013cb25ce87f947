//! Rewrite configuration
//!
//! [`RewriteOptions`] is what callers pass in; [`PatternFlags`] is the
//! parsed flags string of the pattern being rewritten. Both are combined
//! into a [`RewriteContext`] that answers every "should this be rewritten"
//! question during the walk.
//!
//! Options can be loaded from JSON using the same camelCase keys build
//! tools put in their configuration files:
//!
//! ```json
//! { "unicodePropertyEscape": true, "useUnicodeFlag": true, "modifiers": "transform" }
//! ```

use serde::{Deserialize, Serialize};

use super::ast::Modifiers;
use super::code_point_set::SerializeOptions;
use super::error::{Result, RewriteError};

/// What to do with modifier groups such as `(?i:...)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifiersMode {
    /// Reject them as invalid groups
    #[default]
    Off,
    /// Accept them and pass them through
    Parse,
    /// Replace them with non-capturing groups and emulate their flags
    Transform,
}

/// Which pattern features to compile away
///
/// Every option defaults to `false`, which leaves the corresponding feature
/// untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RewriteOptions {
    /// Emulate the `s` flag: `.` matches line terminators and `s` is
    /// removed from the output flags
    pub dot_all_flag: bool,
    /// Keep the `s` flag; conflicts with `dot_all_flag`
    pub use_dot_all_flag: bool,
    /// Keep the `u` flag instead of emulating it with surrogate pairs
    pub use_unicode_flag: bool,
    /// Replace `\p{...}` escapes with explicit sets
    pub unicode_property_escape: bool,
    /// Replace named groups and `\k<name>` with numbered ones
    pub named_group: bool,
    /// Accept lookbehind assertions
    pub lookbehind: bool,
    /// Handling of modifier groups
    pub modifiers: ModifiersMode,
}

impl RewriteOptions {
    /// Create options with every feature left untouched
    pub fn new() -> Self {
        Self::default()
    }

    /// Emulate the `s` flag
    pub fn with_dot_all_flag(mut self, enabled: bool) -> Self {
        self.dot_all_flag = enabled;
        self
    }

    /// Keep the `s` flag in the output
    pub fn with_use_dot_all_flag(mut self, enabled: bool) -> Self {
        self.use_dot_all_flag = enabled;
        self
    }

    /// Keep the `u` flag in the output
    pub fn with_use_unicode_flag(mut self, enabled: bool) -> Self {
        self.use_unicode_flag = enabled;
        self
    }

    /// Replace property escapes
    pub fn with_unicode_property_escape(mut self, enabled: bool) -> Self {
        self.unicode_property_escape = enabled;
        self
    }

    /// Replace named groups
    pub fn with_named_group(mut self, enabled: bool) -> Self {
        self.named_group = enabled;
        self
    }

    /// Accept lookbehind assertions
    pub fn with_lookbehind(mut self, enabled: bool) -> Self {
        self.lookbehind = enabled;
        self
    }

    /// Accept or compile away modifier groups
    pub fn with_modifiers(mut self, mode: ModifiersMode) -> Self {
        self.modifiers = mode;
        self
    }

    /// Reject contradictory combinations
    pub fn validate(&self) -> Result<()> {
        if self.use_dot_all_flag && self.dot_all_flag {
            return Err(RewriteError::InvalidOptions {
                reason: "`useDotAllFlag` and `dotAllFlag` cannot both be enabled".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize options to JSON
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize options from JSON, rejecting unknown keys
    pub fn from_json(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// The flags of a regular expression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    /// `d`
    pub has_indices: bool,
    /// `g`
    pub global: bool,
    /// `i`
    pub ignore_case: bool,
    /// `m`
    pub multiline: bool,
    /// `s`
    pub dot_all: bool,
    /// `u`
    pub unicode: bool,
    /// `y`
    pub sticky: bool,
}

impl PatternFlags {
    /// Parse a flags string such as `"giu"`
    ///
    /// # Example
    ///
    /// ```rust
    /// use es_regex_rewrite::pattern::options::PatternFlags;
    ///
    /// let flags = PatternFlags::parse("iu").unwrap();
    /// assert!(flags.ignore_case && flags.unicode);
    /// assert!(PatternFlags::parse("gg").is_err());
    /// ```
    pub fn parse(flags: &str) -> Result<Self> {
        let mut parsed = PatternFlags::default();
        for flag in flags.chars() {
            let slot = match flag {
                'd' => &mut parsed.has_indices,
                'g' => &mut parsed.global,
                'i' => &mut parsed.ignore_case,
                'm' => &mut parsed.multiline,
                's' => &mut parsed.dot_all,
                'u' => &mut parsed.unicode,
                'y' => &mut parsed.sticky,
                'v' => return Err(RewriteError::UnsupportedFlag { flag }),
                _ => {
                    return Err(RewriteError::InvalidFlags {
                        flags: flags.to_string(),
                    })
                }
            };
            if *slot {
                return Err(RewriteError::InvalidFlags {
                    flags: flags.to_string(),
                });
            }
            *slot = true;
        }
        Ok(parsed)
    }

    /// Whether the flag letter `flag` is set
    pub fn has(&self, flag: char) -> bool {
        match flag {
            'd' => self.has_indices,
            'g' => self.global,
            'i' => self.ignore_case,
            'm' => self.multiline,
            's' => self.dot_all,
            'u' => self.unicode,
            'y' => self.sticky,
            _ => false,
        }
    }
}

/// Overrides of the `i`, `m` and `s` flags in effect for part of a pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ModifierScope {
    ignore_case: Option<bool>,
    multiline: Option<bool>,
    dot_all: Option<bool>,
}

impl ModifierScope {
    fn set(&mut self, flag: char, enabled: bool) {
        match flag {
            'i' => self.ignore_case = Some(enabled),
            'm' => self.multiline = Some(enabled),
            's' => self.dot_all = Some(enabled),
            _ => {}
        }
    }

    fn get(&self, flag: char) -> Option<bool> {
        match flag {
            'i' => self.ignore_case,
            'm' => self.multiline,
            's' => self.dot_all,
            _ => None,
        }
    }
}

/// Everything the rewriter needs to know about one part of a pattern
///
/// Derived once from the flags and options and passed by value through the
/// walk; a modifier group gets a context of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteContext {
    /// The pattern has the `u` flag
    pub unicode: bool,
    /// Matching is case-insensitive here
    pub ignore_case: bool,
    /// The output keeps the `i` flag, so the engine folds case
    pub native_ignore_case: bool,
    /// `.` matches line terminators here
    pub dot_matches_all: bool,
    /// `.` is written as `[\s\S]`
    pub dot_all: bool,
    /// `^` and `$` are written as multiline assertions
    pub multiline: bool,
    /// The `u` flag is emulated
    pub transform_unicode: bool,
    /// Sets get their case folding orbits added
    pub fold: bool,
    /// Sets get the other case of ASCII letters added
    pub ascii_fold: bool,
    /// Property escapes are replaced by explicit sets
    pub emulate_properties: bool,
    /// Named groups are replaced by numbered ones
    pub named_group: bool,
    /// Modifier groups are replaced by non-capturing groups
    pub transform_modifiers: bool,
    /// How sets are written back
    pub serialize: SerializeOptions,
    flags: PatternFlags,
    options: RewriteOptions,
    scope: ModifierScope,
    lifted: ModifierScope,
}

impl RewriteContext {
    /// Derive the context for one rewrite
    pub fn new(flags: &PatternFlags, options: &RewriteOptions) -> Self {
        let context = Self::derive(
            *flags,
            *options,
            ModifierScope::default(),
            ModifierScope::default(),
        );
        log_debug!("rewrite context: {:?}", context);
        context
    }

    fn derive(
        flags: PatternFlags,
        options: RewriteOptions,
        scope: ModifierScope,
        lifted: ModifierScope,
    ) -> Self {
        let unicode = flags.unicode;
        let transform_unicode = unicode && !options.use_unicode_flag;
        let ignore_case = scope.ignore_case.unwrap_or(flags.ignore_case);
        let explicit_ignore_case = scope.ignore_case == Some(true);

        Self {
            unicode,
            ignore_case,
            native_ignore_case: flags.ignore_case && lifted.ignore_case.is_none(),
            dot_matches_all: scope.dot_all.unwrap_or(flags.dot_all),
            dot_all: scope.dot_all.unwrap_or(options.dot_all_flag && flags.dot_all),
            multiline: scope.multiline == Some(true),
            transform_unicode,
            fold: unicode && ignore_case && (transform_unicode || explicit_ignore_case),
            ascii_fold: !unicode && explicit_ignore_case,
            emulate_properties: unicode && (options.unicode_property_escape || transform_unicode),
            named_group: options.named_group,
            transform_modifiers: options.modifiers == ModifiersMode::Transform,
            serialize: SerializeOptions {
                bmp_only: !unicode,
                has_unicode_flag: unicode && options.use_unicode_flag,
            },
            flags,
            options,
            scope,
            lifted,
        }
    }

    /// Take flags that some modifier group disables out of the flags string
    ///
    /// `disabled` lists the flags disabled anywhere in the pattern. Each one
    /// the pattern has is removed from the output flags and enabled
    /// explicitly at the top level instead, so a group can switch it off.
    pub fn lift(&self, disabled: &str) -> Self {
        let mut lifted = ModifierScope::default();
        for flag in disabled.chars().filter(|&flag| self.flags.has(flag)) {
            lifted.set(flag, true);
        }
        log_debug!("lifted flags: {:?}", lifted);
        Self::derive(self.flags, self.options, lifted, lifted)
    }

    /// The context inside a modifier group
    pub fn with_modifiers(&self, modifiers: &Modifiers) -> Self {
        let mut scope = self.scope;
        for flag in modifiers.enabling.chars() {
            scope.set(flag, true);
        }
        for flag in modifiers.disabling.chars() {
            scope.set(flag, false);
        }
        Self::derive(self.flags, self.options, scope, self.lifted)
    }

    /// The flags of the rewritten pattern
    ///
    /// Removes `u` when the unicode flag is emulated, `s` when the dot-all
    /// flag is emulated and any lifted flag; everything else keeps its order.
    pub fn output_flags(&self, flags: &str) -> String {
        let emulate_dot_all = self.options.dot_all_flag && self.flags.dot_all;
        flags
            .chars()
            .filter(|&flag| !(flag == 'u' && self.transform_unicode))
            .filter(|&flag| !(flag == 's' && emulate_dot_all))
            .filter(|&flag| self.lifted.get(flag).is_none())
            .collect()
    }
}
