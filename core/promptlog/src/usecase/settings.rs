//! 実行設定の解決（既定値 → 設定ファイル → CLI）
//!
//! API キーはここで一度だけ環境から読み、Settings に載せて補完サービスの
//! 構築に渡す。キーが必要なのに無ければ、ネットワーク・ファイル操作の前に Config エラー。

use common::domain::{ApiKey, OutDir};
use common::error::Error;
use common::llm::ProviderType;
use common::ports::outbound::EnvResolver;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::settings::{
    DEFAULT_API_KEY_ENV, DEFAULT_COMMIT_MESSAGE, DEFAULT_MAX_TOKENS, DEFAULT_TIMEOUT_SECS,
};
use crate::domain::{FileConfig, LogFormat, RunOptions, Settings, SyncMode};

/// 設定ファイルの文字列値を enum に変換する。不正値は Config エラー。
fn parse_file_value<T>(value: Option<&str>, key: &str) -> Result<Option<T>, Error>
where
    T: FromStr<Err = Error>,
{
    value
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| Error::config(format!("config.json: {}: {}", key, e)))
        })
        .transpose()
}

pub fn resolve_settings(
    opts: &RunOptions,
    file: &FileConfig,
    env: &dyn EnvResolver,
) -> Result<Settings, Error> {
    let provider = match opts.provider {
        Some(p) => p,
        None => parse_file_value::<ProviderType>(file.provider.as_deref(), "provider")?
            .unwrap_or_default(),
    };

    let api_key_env = file
        .api_key_env
        .clone()
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
    let api_key = env.var(&api_key_env).map(ApiKey::new);
    if provider.requires_api_key() && api_key.is_none() {
        return Err(Error::config(format!(
            "Please set the {} environment variable.",
            api_key_env
        )));
    }

    let out_dir = match opts.out_dir.clone().or_else(|| file.out_dir.clone()) {
        Some(dir) => OutDir::new(dir),
        None => OutDir::new(env.current_dir()?),
    };

    let layout = match opts.layout {
        Some(l) => l,
        None => parse_file_value(file.layout.as_deref(), "layout")?.unwrap_or_default(),
    };
    let log_format: LogFormat = match opts.log_format {
        Some(f) => f,
        None => parse_file_value(file.log_format.as_deref(), "log_format")?.unwrap_or_default(),
    };
    let log_file = opts
        .log_file
        .clone()
        .or_else(|| file.log_file.clone())
        .unwrap_or_else(|| log_format.default_file_name().into());
    let log_path = if log_file.is_absolute() {
        log_file
    } else {
        out_dir.join(log_file)
    };

    let allocator = match opts.allocator {
        Some(a) => a,
        None => parse_file_value(file.allocator.as_deref(), "allocator")?.unwrap_or_default(),
    };

    let mut sync = match opts.sync {
        Some(s) => s,
        None => parse_file_value(file.sync.as_deref(), "sync")?.unwrap_or_default(),
    };
    if opts.non_interactive && sync == SyncMode::Ask {
        sync = SyncMode::Never;
    }

    Ok(Settings {
        provider,
        endpoint: opts.endpoint.clone().or_else(|| file.endpoint.clone()),
        api_key,
        max_tokens: opts.max_tokens.or(file.max_tokens).unwrap_or(DEFAULT_MAX_TOKENS),
        timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        out_dir,
        layout,
        log_format,
        log_path,
        allocator,
        sync,
        commit_message: opts
            .commit_message
            .clone()
            .or_else(|| file.commit_message.clone())
            .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
        trim_prompt: opts.trim,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AllocatorKind, OutputLayout};
    use common::domain::HomeDir;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MapEnv(HashMap<String, String>);

    impl MapEnv {
        fn with(pairs: &[(&str, &str)]) -> Self {
            Self(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl EnvResolver for MapEnv {
        fn var(&self, name: &str) -> Option<String> {
            self.0.get(name).cloned().filter(|s| !s.is_empty())
        }

        fn resolve_home_dir(&self) -> Result<HomeDir, Error> {
            Ok(HomeDir::new("/home/u/.config/promptlog"))
        }

        fn current_dir(&self) -> Result<PathBuf, Error> {
            Ok(PathBuf::from("/work"))
        }
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let env = MapEnv::with(&[]);
        let err = resolve_settings(&RunOptions::default(), &FileConfig::default(), &env)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_empty_api_key_counts_as_missing() {
        let env = MapEnv::with(&[("OPENAI_API_KEY", "")]);
        assert!(resolve_settings(&RunOptions::default(), &FileConfig::default(), &env).is_err());
    }

    #[test]
    fn test_echo_does_not_need_api_key() {
        let env = MapEnv::with(&[]);
        let opts = RunOptions {
            provider: Some(ProviderType::Echo),
            ..Default::default()
        };
        let s = resolve_settings(&opts, &FileConfig::default(), &env).unwrap();
        assert!(s.api_key.is_none());
    }

    #[test]
    fn test_defaults() {
        let env = MapEnv::with(&[("OPENAI_API_KEY", "sk-1")]);
        let s = resolve_settings(&RunOptions::default(), &FileConfig::default(), &env).unwrap();
        assert_eq!(s.provider, ProviderType::OpenAi);
        assert_eq!(s.api_key.as_ref().map(|k| k.expose()), Some("sk-1"));
        assert_eq!(s.max_tokens, 3000);
        assert_eq!(s.out_dir, OutDir::new("/work"));
        assert_eq!(s.layout, OutputLayout::Both);
        assert_eq!(s.log_format, LogFormat::Jsonl);
        assert_eq!(s.log_path, PathBuf::from("/work/pc.jsonl"));
        assert_eq!(s.allocator, AllocatorKind::Counter);
        assert_eq!(s.sync, SyncMode::Ask);
        assert_eq!(s.commit_message, "Added prompt and completion files");
        assert_eq!(s.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_cli_overrides_file() {
        let env = MapEnv::with(&[("MY_KEY", "sk-2")]);
        let file = FileConfig {
            api_key_env: Some("MY_KEY".to_string()),
            max_tokens: Some(100),
            log_format: Some("concat".to_string()),
            allocator: Some("scan".to_string()),
            out_dir: Some(PathBuf::from("/from-file")),
            ..Default::default()
        };
        let opts = RunOptions {
            max_tokens: Some(7),
            out_dir: Some(PathBuf::from("/from-cli")),
            ..Default::default()
        };
        let s = resolve_settings(&opts, &file, &env).unwrap();
        assert_eq!(s.max_tokens, 7);
        assert_eq!(s.log_format, LogFormat::Concat);
        assert_eq!(s.allocator, AllocatorKind::Scan);
        assert_eq!(s.log_path, PathBuf::from("/from-cli/pc.json"));
    }

    #[test]
    fn test_invalid_file_value_is_config_error() {
        let env = MapEnv::with(&[("OPENAI_API_KEY", "k")]);
        let file = FileConfig {
            layout: Some("sideways".to_string()),
            ..Default::default()
        };
        let err = resolve_settings(&RunOptions::default(), &file, &env).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("layout"));
    }

    #[test]
    fn test_non_interactive_turns_ask_into_never() {
        let env = MapEnv::with(&[("OPENAI_API_KEY", "k")]);
        let opts = RunOptions {
            non_interactive: true,
            ..Default::default()
        };
        let s = resolve_settings(&opts, &FileConfig::default(), &env).unwrap();
        assert_eq!(s.sync, SyncMode::Never);

        let opts = RunOptions {
            non_interactive: true,
            sync: Some(SyncMode::Always),
            ..Default::default()
        };
        let s = resolve_settings(&opts, &FileConfig::default(), &env).unwrap();
        assert_eq!(s.sync, SyncMode::Always);
    }

    #[test]
    fn test_absolute_log_file_is_kept() {
        let env = MapEnv::with(&[("OPENAI_API_KEY", "k")]);
        let opts = RunOptions {
            log_file: Some(PathBuf::from("/var/log/pc.jsonl")),
            ..Default::default()
        };
        let s = resolve_settings(&opts, &FileConfig::default(), &env).unwrap();
        assert_eq!(s.log_path, PathBuf::from("/var/log/pc.jsonl"));
    }
}
