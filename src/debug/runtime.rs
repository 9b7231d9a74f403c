use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::RwLock;

/// Toggle honouring the `speak-as` descriptor.
pub const SPEAK_AS_TOGGLE: &str = "FASTCOUNTER_SPEAK_AS";
/// Toggle overriding the generated representation length limit.
pub const LENGTH_LIMIT_TOGGLE: &str = "FASTCOUNTER_LENGTH_LIMIT";

/// Representations must be supported up to at least 60 code points; since symbols may be
/// stored as UTF-16 by embedders, the default limit leaves room for twice that.
pub const DEFAULT_COUNTER_LENGTH_LIMIT: usize = 120;
/// Smallest limit a toggle may configure.
pub const MIN_COUNTER_LENGTH_LIMIT: usize = 60;

/// Parsed runtime configuration toggles sourced from `FASTCOUNTER_*` environment variables.
///
/// Values are captured once (via [`RuntimeToggles::from_env`]) and then reused for every
/// generation. Callers can also construct instances manually to override environment-derived
/// behavior when embedding the library.
#[derive(Debug, Clone, Default)]
pub struct RuntimeToggles {
  raw: HashMap<String, String>,
  config: CounterStyleConfig,
}

impl RuntimeToggles {
  /// Parse all `FASTCOUNTER_*` environment variables into a toggle map.
  pub fn from_env() -> Self {
    let raw = std::env::vars()
      .filter(|(k, _)| k.starts_with("FASTCOUNTER_"))
      .collect::<HashMap<_, _>>();
    Self::from_map(raw)
  }

  /// Construct a toggle set from a provided map of key/value pairs.
  pub fn from_map(raw: HashMap<String, String>) -> Self {
    let config = CounterStyleConfig::from_env_map(&raw);
    Self { raw, config }
  }

  /// Returns parsed, typed configuration derived from the toggles.
  pub fn config(&self) -> &CounterStyleConfig {
    &self.config
  }

  /// Returns the raw string value for a toggle, if set.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.raw.get(key).map(String::as_str)
  }

  /// Returns true when the toggle is present and truthy (`!= 0`/`false`/`off`).
  pub fn truthy(&self, key: &str) -> bool {
    self.truthy_with_default(key, false)
  }

  /// Returns true when the toggle is present and truthy, otherwise the provided default.
  pub fn truthy_with_default(&self, key: &str, default: bool) -> bool {
    truthy(self.raw.get(key), default)
  }

  /// Parse a toggle as `usize`, returning `None` when unset or unparseable.
  pub fn usize(&self, key: &str) -> Option<usize> {
    self.get(key).and_then(|v| v.trim().parse::<usize>().ok())
  }

  /// Parse a toggle as `usize`, falling back to a default when unset or invalid.
  pub fn usize_with_default(&self, key: &str, default: usize) -> usize {
    self.usize(key).unwrap_or(default)
  }
}

/// Typed view over the counter style toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterStyleConfig {
  /// Whether the `speak-as` descriptor participates in text alternatives.
  pub speak_as_enabled: bool,
  /// Maximum number of symbol repetitions / pad copies a representation may use.
  pub length_limit: usize,
}

impl Default for CounterStyleConfig {
  fn default() -> Self {
    Self {
      speak_as_enabled: true,
      length_limit: DEFAULT_COUNTER_LENGTH_LIMIT,
    }
  }
}

impl CounterStyleConfig {
  pub fn from_env_map(raw: &HashMap<String, String>) -> Self {
    let length_limit = raw
      .get(LENGTH_LIMIT_TOGGLE)
      .and_then(|v| v.trim().parse::<usize>().ok())
      .map(|limit| limit.max(MIN_COUNTER_LENGTH_LIMIT))
      .unwrap_or(DEFAULT_COUNTER_LENGTH_LIMIT);
    Self {
      speak_as_enabled: truthy(raw.get(SPEAK_AS_TOGGLE), true),
      length_limit,
    }
  }

  /// Configuration of the currently active toggles.
  pub fn current() -> Self {
    *runtime_toggles().config()
  }
}

fn matches_ignore_case(value: &str, candidates: &[&str]) -> bool {
  let lower = value.trim().to_ascii_lowercase();
  candidates.iter().any(|c| lower == *c)
}

fn truthy(raw: Option<&String>, default: bool) -> bool {
  raw
    .map(|v| !matches_ignore_case(v, &["0", "false", "off"]))
    .unwrap_or(default)
}

static DEFAULT_TOGGLES: OnceLock<Arc<RuntimeToggles>> = OnceLock::new();
static ACTIVE_TOGGLES: OnceLock<RwLock<Arc<RuntimeToggles>>> = OnceLock::new();

/// Returns the currently active runtime toggles.
///
/// Defaults to `RuntimeToggles::from_env()` if no overrides are installed.
pub fn runtime_toggles() -> Arc<RuntimeToggles> {
  let lock = ACTIVE_TOGGLES.get_or_init(|| RwLock::new(default_toggles()));
  match lock.read() {
    Ok(guard) => guard.clone(),
    Err(poisoned) => poisoned.into_inner().clone(),
  }
}

fn default_toggles() -> Arc<RuntimeToggles> {
  DEFAULT_TOGGLES
    .get_or_init(|| Arc::new(RuntimeToggles::from_env()))
    .clone()
}

/// Guard that restores the previous active toggles when dropped.
pub struct RuntimeTogglesGuard {
  previous: Arc<RuntimeToggles>,
}

impl Drop for RuntimeTogglesGuard {
  fn drop(&mut self) {
    if let Some(lock) = ACTIVE_TOGGLES.get() {
      if let Ok(mut guard) = lock.write() {
        *guard = self.previous.clone();
      }
    }
  }
}

/// Install the provided toggles as the active set for the duration of the returned guard.
pub fn set_runtime_toggles(toggles: Arc<RuntimeToggles>) -> RuntimeTogglesGuard {
  let lock = ACTIVE_TOGGLES.get_or_init(|| RwLock::new(default_toggles()));
  let mut guard = match lock.write() {
    Ok(guard) => guard,
    Err(poisoned) => poisoned.into_inner(),
  };
  let previous = std::mem::replace(&mut *guard, toggles);
  RuntimeTogglesGuard { previous }
}

/// Convenience helper to run a closure with a temporary toggles override.
pub fn with_runtime_toggles<T>(toggles: Arc<RuntimeToggles>, f: impl FnOnce() -> T) -> T {
  let guard = set_runtime_toggles(toggles);
  let result = f();
  drop(guard);
  result
}
