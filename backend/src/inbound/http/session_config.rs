//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning; release
//! builds insist on every toggle being present and valid.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const DEFAULT_KEY_PATH: &str = "/var/run/secrets/session_key";
const MIN_KEY_LEN: usize = 64;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Whether validation follows debug or release rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode matching the current build profile.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {MIN_KEY_LEN} bytes, got {length}")]
    KeyTooShort { path: PathBuf, length: usize },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Reads toggles, substituting defaults only in debug builds.
struct Toggles<'a, E: Env> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Toggles<'_, E> {
    fn lenient(&self) -> bool {
        self.mode == BuildMode::Debug
    }

    /// Parse `name`, or fall back to `default` in debug builds.
    fn read<T>(
        &self,
        name: &'static str,
        expected: &'static str,
        default: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            if self.lenient() {
                warn!(variable = name, "session toggle not set; using default");
                return Ok(default);
            }
            return Err(SessionConfigError::MissingEnv { name });
        };
        match parse(&value) {
            Some(parsed) => Ok(parsed),
            None if self.lenient() => {
                warn!(variable = name, %value, "invalid session toggle; using default");
                Ok(default)
            }
            None => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

/// Build session settings from `SESSION_*` variables.
///
/// # Errors
///
/// Release builds fail on missing or malformed toggles, a short or
/// unreadable key file, `SameSite=None` without `Secure`, or ephemeral keys.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let toggles = Toggles { env, mode };
    let cookie_secure = toggles.read(COOKIE_SECURE_ENV, BOOL_EXPECTED, true, parse_bool)?;
    let fallback_same_site = if toggles.lenient() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let same_site = toggles.read(
        SAMESITE_ENV,
        SAMESITE_EXPECTED,
        fallback_same_site,
        parse_same_site,
    )?;
    if same_site == SameSite::None && !cookie_secure {
        if !toggles.lenient() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it");
    }
    let allow_ephemeral = toggles.read(ALLOW_EPHEMERAL_ENV, BOOL_EXPECTED, false, parse_bool)?;
    if allow_ephemeral && !toggles.lenient() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = load_key(&toggles, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn load_key<E: Env>(toggles: &Toggles<'_, E>, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        toggles
            .env
            .string(KEY_FILE_ENV)
            .unwrap_or_else(|| DEFAULT_KEY_PATH.to_owned()),
    );
    match std::fs::read(&path).map(Zeroizing::new) {
        Ok(bytes) if bytes.len() >= MIN_KEY_LEN => Ok(Key::derive_from(&bytes)),
        Ok(bytes) if toggles.lenient() => {
            warn!(path = %path.display(), length = bytes.len(), "session key too short; using a temporary key");
            Ok(Key::generate())
        }
        Ok(bytes) => Err(SessionConfigError::KeyTooShort {
            path,
            length: bytes.len(),
        }),
        Err(error) if toggles.lenient() || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using a temporary session key");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    use super::*;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![b'k'; len]).expect("write key");
        file
    }

    fn env_with(vars: HashMap<&'static str, String>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |name| vars.get(name).cloned());
        env
    }

    #[fixture]
    fn long_key() -> NamedTempFile {
        key_file(MIN_KEY_LEN)
    }

    fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
        HashMap::from([
            (KEY_FILE_ENV, key.path().display().to_string()),
            (COOKIE_SECURE_ENV, "1".to_owned()),
            (SAMESITE_ENV, "Strict".to_owned()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ])
    }

    #[rstest]
    fn release_accepts_a_complete_configuration(long_key: NamedTempFile) {
        let env = env_with(release_vars(&long_key));
        let settings =
            session_settings_from_env(&env, BuildMode::Release).expect("valid settings");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV)]
    #[case(SAMESITE_ENV)]
    #[case(ALLOW_EPHEMERAL_ENV)]
    fn release_requires_every_toggle(long_key: NamedTempFile, #[case] missing: &'static str) {
        let mut vars = release_vars(&long_key);
        vars.remove(missing);
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("missing toggle");
        assert!(matches!(err, SessionConfigError::MissingEnv { name } if name == missing));
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV, "maybe")]
    #[case(SAMESITE_ENV, "sometimes")]
    fn release_rejects_malformed_toggles(
        long_key: NamedTempFile,
        #[case] name: &'static str,
        #[case] value: &str,
    ) {
        let mut vars = release_vars(&long_key);
        vars.insert(name, value.to_owned());
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("invalid toggle");
        assert!(matches!(err, SessionConfigError::InvalidEnv { .. }));
    }

    #[rstest]
    fn release_rejects_short_keys() {
        let short = key_file(16);
        let err = session_settings_from_env(&env_with(release_vars(&short)), BuildMode::Release)
            .err()
            .expect("short key");
        assert!(matches!(err, SessionConfigError::KeyTooShort { length: 16, .. }));
    }

    #[rstest]
    fn release_rejects_insecure_same_site_none(long_key: NamedTempFile) {
        let mut vars = release_vars(&long_key);
        vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
        vars.insert(SAMESITE_ENV, "None".to_owned());
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("insecure none");
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn release_refuses_ephemeral_keys(long_key: NamedTempFile) {
        let mut vars = release_vars(&long_key);
        vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
        let err = session_settings_from_env(&env_with(vars), BuildMode::Release)
            .err()
            .expect("ephemeral");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn debug_falls_back_to_lenient_defaults() {
        let vars = HashMap::from([(KEY_FILE_ENV, "/nonexistent/session_key".to_owned())]);
        let settings =
            session_settings_from_env(&env_with(vars), BuildMode::Debug).expect("defaults");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }
}
