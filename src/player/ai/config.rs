use crate::core::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

const CONFIG_PATH: &str = "ai_config.json";

/// 揺らぎと重みの上限。評価値が探索窓や i32 を越えないようにする。
pub const MAX_JITTER: i32 = 1_000_000;
pub const MAX_WEIGHT: i32 = 1_000_000;

static CONFIG: Lazy<AIConfig> = Lazy::new(AIConfig::load_or_default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub difficulties: Vec<DifficultyProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub pattern_weights: PatternWeights,
}

/// 連の長さ n (1..=5) と開いた端の数 open (0..=2) から重みを引く表。
///
/// `rows[n - 1][open]`。表に無い組み合わせは 0。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternWeights {
    pub rows: [[i32; 3]; 5],
}

impl Default for PatternWeights {
    fn default() -> Self {
        PatternWeights {
            rows: [
                [1, 2, 0],
                [10, 20, 0],
                [30, 50, 0],
                [60, 100, 0],
                [88888, 88888, 88888],
            ],
        }
    }
}

impl PatternWeights {
    pub fn weight(&self, run: usize, open: usize) -> i32 {
        if run == 0 || open > 2 {
            return 0;
        }
        self.rows[run.min(5) - 1][open]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.rows.iter().flatten().find(|w| !(0..=MAX_WEIGHT).contains(*w)) {
            Some(&w) => Err(ConfigError::WeightOutOfRange(w)),
            None => Ok(()),
        }
    }
}

/// 難易度ごとの探索設定。対局中は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: String,
    pub depth: i32,
    pub neighborhood_radius: i32,
    /// 負の値は評価を下方向に揺らす (弱い AI 用)
    pub jitter_magnitude: i32,
    /// 着手を見せるまでの待ち時間。探索には影響しない。
    pub response_delay_ms: u64,
}

/// 検証済みの探索パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub depth: u32,
    pub radius: usize,
    pub jitter: i32,
}

impl DifficultyProfile {
    pub fn new(name: &str, depth: i32, radius: i32, jitter: i32, delay_ms: u64) -> Self {
        DifficultyProfile {
            name: name.to_string(),
            depth,
            neighborhood_radius: radius,
            jitter_magnitude: jitter,
            response_delay_ms: delay_ms,
        }
    }

    pub fn validate(&self) -> Result<SearchParams, ConfigError> {
        if self.depth <= 0 {
            return Err(ConfigError::NonPositiveDepth(self.depth));
        }
        if self.neighborhood_radius < 0 {
            return Err(ConfigError::NegativeRadius(self.neighborhood_radius));
        }
        if !(-MAX_JITTER..=MAX_JITTER).contains(&self.jitter_magnitude) {
            return Err(ConfigError::JitterOutOfRange(self.jitter_magnitude));
        }
        Ok(SearchParams {
            depth: self.depth as u32,
            radius: self.neighborhood_radius as usize,
            jitter: self.jitter_magnitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Advanced,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Beginner, Difficulty::Advanced, Difficulty::Expert];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "L1 Beginner",
            Difficulty::Advanced => "L2 Advanced",
            Difficulty::Expert => "L3 Expert",
        }
    }

    /// 組み込みの既定値
    pub fn default_profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Beginner => DifficultyProfile::new(self.label(), 1, 5, -60, 80),
            Difficulty::Advanced => DifficultyProfile::new(self.label(), 1, 6, 3, 200),
            Difficulty::Expert => DifficultyProfile::new(self.label(), 2, 8, 2, 500),
        }
    }

    /// 設定ファイルに同名の難易度があればそちらを使う
    pub fn profile(self) -> DifficultyProfile {
        AIConfig::get()
            .difficulty(self.label())
            .cloned()
            .unwrap_or_else(|| self.default_profile())
    }
}

impl AIConfig {
    /// プロセス全体で共有する設定 (初回アクセス時に読み込む)
    pub fn get() -> &'static AIConfig {
        &CONFIG
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: AIConfig = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::debug!("using built-in AI config ({})", e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evaluation.pattern_weights.validate()?;
        for profile in &self.difficulties {
            profile.validate()?;
        }
        Ok(())
    }

    pub fn difficulty(&self, name: &str) -> Option<&DifficultyProfile> {
        self.difficulties.iter().find(|d| d.name == name)
    }

    pub fn require_difficulty(&self, name: &str) -> Result<&DifficultyProfile, ConfigError> {
        self.difficulty(name)
            .ok_or_else(|| ConfigError::UnknownDifficulty(name.to_string()))
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig {
                pattern_weights: PatternWeights::default(),
            },
            difficulties: Difficulty::ALL
                .iter()
                .map(|d| d.default_profile())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_table() {
        let w = PatternWeights::default();
        assert_eq!(w.weight(1, 0), 1);
        assert_eq!(w.weight(1, 1), 2);
        assert_eq!(w.weight(2, 0), 10);
        assert_eq!(w.weight(2, 1), 20);
        assert_eq!(w.weight(3, 0), 30);
        assert_eq!(w.weight(3, 1), 50);
        assert_eq!(w.weight(4, 0), 60);
        assert_eq!(w.weight(4, 1), 100);
        for open in 0..=2 {
            assert_eq!(w.weight(5, open), 88888);
            assert_eq!(w.weight(9, open), 88888);
        }
    }

    #[test]
    fn test_untabulated_pairs_score_zero() {
        let w = PatternWeights::default();
        for run in 1..=4 {
            assert_eq!(w.weight(run, 2), 0);
        }
        assert_eq!(w.weight(0, 1), 0);
        assert_eq!(w.weight(3, 3), 0);
    }

    #[test]
    fn test_default_tiers_validate() {
        for d in Difficulty::ALL {
            let params = d.default_profile().validate().unwrap();
            assert!(params.depth >= 1);
        }
        let beginner = Difficulty::Beginner.default_profile().validate().unwrap();
        assert_eq!(
            beginner,
            SearchParams {
                depth: 1,
                radius: 5,
                jitter: -60
            }
        );
        let expert = Difficulty::Expert.default_profile().validate().unwrap();
        assert_eq!(expert.depth, 2);
        assert_eq!(expert.radius, 8);
    }

    #[test]
    fn test_validation_rejects_bad_profiles() {
        let zero_depth = DifficultyProfile::new("bad", 0, 3, 0, 0);
        assert_eq!(zero_depth.validate(), Err(ConfigError::NonPositiveDepth(0)));

        let negative_radius = DifficultyProfile::new("bad", 2, -1, 0, 0);
        assert_eq!(
            negative_radius.validate(),
            Err(ConfigError::NegativeRadius(-1))
        );

        let mut config = AIConfig::default();
        config.difficulties.push(zero_depth);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bounds_jitter_and_weights() {
        let wild = DifficultyProfile::new("wild", 1, 1, -10_000_000, 0);
        assert_eq!(
            wild.validate(),
            Err(ConfigError::JitterOutOfRange(-10_000_000))
        );
        let edge = DifficultyProfile::new("edge", 1, 1, -MAX_JITTER, 0);
        assert!(edge.validate().is_ok());

        let mut config = AIConfig::default();
        config.evaluation.pattern_weights.rows[4][0] = -1;
        assert_eq!(config.validate(), Err(ConfigError::WeightOutOfRange(-1)));
        config.evaluation.pattern_weights.rows[4][0] = MAX_WEIGHT + 1;
        assert_eq!(
            config.validate(),
            Err(ConfigError::WeightOutOfRange(MAX_WEIGHT + 1))
        );
    }

    #[test]
    fn test_json_round_trip() {
        let config = AIConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AIConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let mut config = AIConfig::default();
        config.difficulties[0].depth = -3;
        let path = std::env::temp_dir().join(format!(
            "gomoku_ai_config_test_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

        let err = AIConfig::load_from(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::NonPositiveDepth(-3))
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_require_difficulty() {
        let config = AIConfig::default();
        assert!(config.require_difficulty("L2 Advanced").is_ok());
        assert_eq!(
            config.require_difficulty("L9"),
            Err(ConfigError::UnknownDifficulty("L9".to_string()))
        );
    }
}
