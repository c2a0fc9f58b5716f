//! 戦略評価の結果型
//!
//! プロバイダの応答 1 回から生成され、以後変更しない。数値はモデルが出したものをそのまま保持し、
//! 平均や件数の整合性は `consistency()` で報告するだけで補正はしない。

use serde::{Deserialize, Serialize};

/// 1 件のスコア（1〜5 が慣例だが浮動小数で保持）と根拠
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub score: f64,
    pub explanation: String,
}

/// 戦略文書から読み取った目標 1 件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    pub description: String,
    pub relevance_to_objective_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub market_need_score: Score,
    pub market_size_score: Score,
    pub competitive_landscape_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    pub revenue_projection_score: Score,
    pub cost_analysis_score: Score,
    pub profitability_score: Score,
    pub funding_requirements_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalFeasibility {
    pub resource_availability_score: Score,
    pub operational_requirements_score: Score,
    pub scalability_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub market_risk_score: Score,
    pub operational_risk_score: Score,
    pub financial_risk_score: Score,
    pub legal_regulatory_risk_score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAnalysis {
    pub member_impact_score: Score,
    pub game_growth_score: Score,
    pub brand_impact_score: Score,
    pub sustainability_score: Score,
    pub sustainability_justification: String,
}

/// 評価結果のルート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyEvaluation {
    pub title: String,
    pub objectives: Vec<Objective>,
    pub market_analysis: MarketAnalysis,
    pub financial_analysis: FinancialAnalysis,
    pub operational_feasibility: OperationalFeasibility,
    pub risk_analysis: RiskAnalysis,
    pub impact_analysis: ImpactAnalysis,
    /// 他のフィールドに出てくる全スコアの平坦化リスト
    pub all_scores: Vec<Score>,
    pub overall_score: f64,
    pub overall_scores_narrative: String,
}

/// all_scores / overall_score と入れ子のスコアとの整合性
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConsistency {
    /// 入れ子のスコア数（目標ごとに 1 + 各分析グループのスコア）
    pub expected_score_count: usize,
    pub actual_score_count: usize,
    /// all_scores の平均（小数第 1 位で丸め）。all_scores が空なら None
    pub computed_mean: Option<f64>,
    pub declared_overall: f64,
}

/// 丸め後の平均と宣言値の差をこれ未満なら一致とみなす
const MEAN_TOLERANCE: f64 = 0.05;

impl ScoreConsistency {
    pub fn count_matches(&self) -> bool {
        self.expected_score_count == self.actual_score_count
    }

    pub fn mean_matches(&self) -> bool {
        self.computed_mean
            .map(|m| (m - self.declared_overall).abs() < MEAN_TOLERANCE)
            .unwrap_or(true)
    }

    pub fn is_consistent(&self) -> bool {
        self.count_matches() && self.mean_matches()
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

impl StrategyEvaluation {
    /// all_scores 以外に入れ子になっている全スコア（目標 → 市場 → 財務 → 運用 → リスク → インパクトの順）
    pub fn nested_scores(&self) -> Vec<&Score> {
        let m = &self.market_analysis;
        let f = &self.financial_analysis;
        let o = &self.operational_feasibility;
        let r = &self.risk_analysis;
        let i = &self.impact_analysis;
        self.objectives
            .iter()
            .map(|obj| &obj.relevance_to_objective_score)
            .chain([
                &m.market_need_score,
                &m.market_size_score,
                &m.competitive_landscape_score,
                &f.revenue_projection_score,
                &f.cost_analysis_score,
                &f.profitability_score,
                &f.funding_requirements_score,
                &o.resource_availability_score,
                &o.operational_requirements_score,
                &o.scalability_score,
                &r.market_risk_score,
                &r.operational_risk_score,
                &r.financial_risk_score,
                &r.legal_regulatory_risk_score,
                &i.member_impact_score,
                &i.game_growth_score,
                &i.brand_impact_score,
                &i.sustainability_score,
            ])
            .collect()
    }

    pub fn consistency(&self) -> ScoreConsistency {
        let computed_mean = if self.all_scores.is_empty() {
            None
        } else {
            let sum: f64 = self.all_scores.iter().map(|s| s.score).sum();
            Some(round1(sum / self.all_scores.len() as f64))
        };
        ScoreConsistency {
            expected_score_count: self.nested_scores().len(),
            actual_score_count: self.all_scores.len(),
            computed_mean,
            declared_overall: self.overall_score,
        }
    }
}
