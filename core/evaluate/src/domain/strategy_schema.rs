//! 戦略評価の応答スキーマ宣言
//!
//! フィールド名・型・生成指示の表。`StrategyEvaluation` の serde 定義と同じフィールド集合を宣言する
//! （テストで両者の一致を確認している）。

use common::schema::{FieldKind, ObjectSchema};

/// ルート型の名前（function calling の関数名になる）
pub const ROOT_NAME: &str = "StrategyEvaluation";

fn score() -> ObjectSchema {
    ObjectSchema::new("Score", "")
        .field(
            "score",
            FieldKind::Number,
            r#"
            **Score**

            Score for the strategy evaluation.
            "#,
        )
        .field(
            "explanation",
            FieldKind::String,
            r#"
            **Explanation**

            Explanation / justification for the score.
            "#,
        )
}

fn score_kind() -> FieldKind {
    FieldKind::Object(score())
}

fn objective() -> ObjectSchema {
    ObjectSchema::new("Objective", "")
        .field(
            "name",
            FieldKind::String,
            r#"
            **Objective Name**

            Name of the strategic objective derived from the strategy document.
            "#,
        )
        .field(
            "description",
            FieldKind::String,
            r#"
            **Objective Description**

            Description of the strategic objective derived from the strategy document.
            "#,
        )
        .field(
            "relevance_to_objective_score",
            score_kind(),
            r#"
            **Relevance to Objective Score (1-5 integer)**

            Rate the relevance of this objective on a 5-point scale, from 1 (least relevant) to 5 (most relevant).

            **Justification for Relevance to Objective Score**

            Provide a detailed explanation justifying the assigned relevance score, including its alignment with the organization's mission and goals.

            - **Impact on Members**: How does this objective serve the members?
            - **Growth of the Game**: In what way does it contribute to the growth of golf?
            - **Alignment with North Stars**: How does it align with the organization's North Star objectives?
            "#,
        )
}

fn market_analysis() -> ObjectSchema {
    ObjectSchema::new("MarketAnalysis", "")
        .field(
            "market_need_score",
            score_kind(),
            r#"
            **Market Need Score (1-5 integer)**

            Rate the market need for the business idea on a 5-point scale, from 1 (low need) to 5 (high need).

            **Justification for Market Need Score**

            Provide a detailed explanation justifying the market need score, including the pain points and needs addressed by the business idea.

            - **Assessment of Demand**: What is the evidence of demand for this idea?
            - **Member Feedback**: Have members expressed a need for this?
            "#,
        )
        .field(
            "market_size_score",
            score_kind(),
            r#"
            **Market Size Score (1-5 integer)**

            Rate the market size on a 5-point scale, from 1 (small market) to 5 (large market).

            **Justification for Market Size Score**

            Provide a detailed explanation justifying the market size score, including market size estimates and growth potential.

            - **Market Research**: What does market research indicate about the size and potential growth?
            - **Competitive Landscape**: How crowded is the market?
            "#,
        )
        .field(
            "competitive_landscape_score",
            score_kind(),
            r#"
            **Competitive Landscape Score (1-5 integer)**

            Rate the competitive landscape on a 5-point scale, from 1 (high competition) to 5 (low competition).

            **Justification for Competitive Landscape Score**

            Provide a detailed explanation justifying the competitive landscape score, including key competitors and market gaps.

            - **Competitive Dynamics**: Who are the key players and how competitive is the sector?
            - **Differentiation**: How does this business idea stand out from competitors?
            "#,
        )
}

fn financial_analysis() -> ObjectSchema {
    ObjectSchema::new("FinancialAnalysis", "")
        .field(
            "revenue_projection_score",
            score_kind(),
            r#"
            **Revenue Projection Score (1-5 integer)**

            Rate the revenue projection on a 5-point scale, from 1 (low projection) to 5 (high projection).

            **Justification for Revenue Projection Score**

            Provide a detailed explanation justifying the revenue projection score, including potential revenue streams and growth expectations.

            - **Revenue Channels**: What are the main sources of revenue from this idea?
            - **Growth Trajectory**: What are the short-term and long-term revenue projections?
            "#,
        )
        .field(
            "cost_analysis_score",
            score_kind(),
            r#"
            **Cost Analysis Score (1-5 integer)**

            Rate the cost analysis on a 5-point scale, from 1 (high costs) to 5 (low costs).

            **Justification for Cost Analysis Score**

            Provide a detailed explanation justifying the cost analysis score, including initial investments, operational costs, and ongoing expenses.

            - **Start-up Costs**: What are the initial investments required?
            - **Operational Efficiency**: How efficient is the cost structure?
            "#,
        )
        .field(
            "profitability_score",
            score_kind(),
            r#"
            **Profitability Score (1-5 integer)**

            Rate the profitability on a 5-point scale, from 1 (low profitability) to 5 (high profitability).

            **Justification for Profitability Score**

            Provide a detailed explanation justifying the profitability score, including potential margins and return on investment.

            - **Margin Analysis**: What are the expected profit margins?
            - **Return on Investment**: How quickly can we expect to break even and see returns?
            "#,
        )
        .field(
            "funding_requirements_score",
            score_kind(),
            r#"
            **Funding Requirements Score (1-5 integer)**

            Rate the funding requirements on a 5-point scale, from 1 (high funding needs) to 5 (low funding needs).

            **Justification for Funding Requirements Score**

            Provide a detailed explanation justifying the funding requirements score, including potential funding sources and financial sustainability.

            - **Capital Needs**: How much capital is required and for what?
            - **Funding Sources**: What are potential sources of funding, both internal and external?
            "#,
        )
}

fn operational_feasibility() -> ObjectSchema {
    ObjectSchema::new("OperationalFeasibility", "")
        .field(
            "resource_availability_score",
            score_kind(),
            r#"
            **Resource Availability Score (1-5 integer)**

            Rate the availability of necessary resources on a 5-point scale, from 1 (low availability) to 5 (high availability).

            **Justification for Resource Availability Score**

            Provide a detailed explanation justifying the resource availability score, including human, technological, and financial resources.

            - **Human Resources**: Are the required skills and personnel available?
            - **Technological Resources**: Are the necessary technologies in place and accessible?
            "#,
        )
        .field(
            "operational_requirements_score",
            score_kind(),
            r#"
            **Operational Requirements Score (1-5 integer)**

            Rate the operational requirements on a 5-point scale, from 1 (high complexity) to 5 (low complexity).

            **Justification for Operational Requirements Score**

            Provide a detailed explanation justifying the operational requirements score, including the complexity and feasibility of operational processes.

            - **Operational Complexity**: What operational processes are required and how complex are they?
            - **Feasibility**: How feasible is it to implement these processes given current capabilities?
            "#,
        )
        .field(
            "scalability_score",
            score_kind(),
            r#"
            **Scalability Score (1-5 integer)**

            Rate the scalability on a 5-point scale, from 1 (low scalability) to 5 (high scalability).

            **Justification for Scalability Score**

            Provide a detailed explanation justifying the scalability score, including the potential to scale the business and handle growth.

            - **Scalability Potential**: How scalable is the business model?
            - **Growth Capacity**: What infrastructure is needed to support growth?
            "#,
        )
}

fn risk_analysis() -> ObjectSchema {
    ObjectSchema::new("RiskAnalysis", "")
        .field(
            "market_risk_score",
            score_kind(),
            r#"
            **Market Risk Score (1-5 integer)**

            Rate the market risk on a 5-point scale, from 1 (high risk) to 5 (low risk).

            **Justification for Market Risk Score**

            Provide a detailed explanation justifying the market risk score, including external risks such as market fluctuations and competition.

            - **Market Volatility**: What is the level of market fluctuation risk?
            - **Competitive Risk**: How does competition pose a risk?
            "#,
        )
        .field(
            "operational_risk_score",
            score_kind(),
            r#"
            **Operational Risk Score (1-5 integer)**

            Rate the operational risk on a 5-point scale, from 1 (high risk) to 5 (low risk).

            **Justification for Operational Risk Score**

            Provide a detailed explanation justifying the operational risk score, including internal risks such as resource constraints and execution challenges.

            - **Execution Risk**: What are the risks associated with executing the operational plans?
            - **Resource Risk**: How likely are resource shortages or constraints?
            "#,
        )
        .field(
            "financial_risk_score",
            score_kind(),
            r#"
            **Financial Risk Score (1-5 integer)**

            Rate the financial risk on a 5-point scale, from 1 (high risk) to 5 (low risk).

            **Justification for Financial Risk Score**

            Provide a detailed explanation justifying the financial risk score, including financial risks such as funding and revenue variability.

            - **Funding Risk**: What are the risks associated with securing necessary funding?
            - **Revenue Risk**: How stable are the anticipated revenue streams?
            "#,
        )
        .field(
            "legal_regulatory_risk_score",
            score_kind(),
            r#"
            **Legal and Regulatory Risk Score (1-5 integer)**

            Rate the legal and regulatory risk on a 5-point scale, from 1 (high risk) to 5 (low risk).

            **Justification for Legal and Regulatory Risk Score**

            Provide a detailed explanation justifying the legal and regulatory risk score, including compliance with relevant laws and regulations.

            - **Compliance**: What are the legal compliance requirements and risks?
            - **Regulatory Changes**: How susceptible is the business to changes in regulations?
            "#,
        )
}

fn impact_analysis() -> ObjectSchema {
    ObjectSchema::new("ImpactAnalysis", "")
        .field(
            "member_impact_score",
            score_kind(),
            r#"
            **Member Impact Score (1-5 integer)**

            Rate the impact on members on a 5-point scale, from 1 (low impact) to 5 (high impact).

            **Justification for Member Impact Score**

            Provide a detailed explanation justifying the member impact score, including how the business idea benefits PGA members.

            - **Member Services**: How does this idea improve services for members?
            - **Member Satisfaction**: What is the potential impact on member satisfaction and engagement?
            "#,
        )
        .field(
            "game_growth_score",
            score_kind(),
            r#"
            **Game Growth Impact Score (1-5 integer)**

            Rate the impact on the growth of the game on a 5-point scale, from 1 (low impact) to 5 (high impact).

            **Justification for Game Growth Impact Score**

            Provide a detailed explanation justifying the game growth impact score, including how the business idea contributes to the growth of golf.

            - **Participation Increase**: How will this idea drive participation in golf?
            - **Outreach and Engagement**: How does it help in reaching new demographics or expanding current ones?
            "#,
        )
        .field(
            "brand_impact_score",
            score_kind(),
            r#"
            **Brand Impact Score (1-5 integer)**

            Rate the impact on the PGA brand on a 5-point scale, from 1 (low impact) to 5 (high impact).

            **Justification for Brand Impact Score**

            Provide a detailed explanation justifying the brand impact score, including potential impacts on the PGA brand and reputation.

            - **Brand Equity**: How does this idea enhance or maintain brand equity?
            - **Public Perception**: What are the potential effects on public perception of the PGA?
            "#,
        )
        .field(
            "sustainability_score",
            score_kind(),
            r#"
            **Sustainability Impact Score (1-5 integer)**

            Rate the sustainability impact on a 5-point scale, from 1 (low impact) to 5 (high impact).

            **Justification for Sustainability Impact Score**

            Provide a detailed explanation justifying the sustainability impact score, including contributions to environmental and social sustainability goals.

            - **Environmental Impact**: Does this idea support environmental sustainability initiatives?
            - **Social Responsibility**: What are the social implications and benefits?
            "#,
        )
        // 指示なし（型だけを要求する）
        .field("sustainability_justification", FieldKind::String, "")
}

/// `StrategyEvaluation` のスキーマ宣言
pub fn strategy_evaluation_schema() -> ObjectSchema {
    ObjectSchema::new(ROOT_NAME, "")
        .field(
            "title",
            FieldKind::String,
            r#"
            **Strategy Document Title**

            Title of the strategy document being evaluated.
            "#,
        )
        .field(
            "objectives",
            FieldKind::array_of(FieldKind::Object(objective())),
            r#"
            **Objectives and Relevance Scores**

            List of strategic objectives and their respective relevance scores and justifications.
            "#,
        )
        .field(
            "market_analysis",
            FieldKind::Object(market_analysis()),
            r#"
            **Market Analysis Scores and Justifications**

            Market analysis scores and detailed justifications, including market need, market size, and competitive landscape.
            "#,
        )
        .field(
            "financial_analysis",
            FieldKind::Object(financial_analysis()),
            r#"
            **Financial Analysis Scores and Justifications**

            Financial analysis scores and detailed justifications, including revenue projections, cost analysis, profitability, and funding requirements.
            "#,
        )
        .field(
            "operational_feasibility",
            FieldKind::Object(operational_feasibility()),
            r#"
            **Operational Feasibility Scores and Justifications**

            Operational feasibility scores and detailed justifications, including resource availability, operational requirements, and scalability.
            "#,
        )
        .field(
            "risk_analysis",
            FieldKind::Object(risk_analysis()),
            r#"
            **Risk Analysis Scores and Justifications**

            Risk analysis scores and detailed justifications, including market risk, operational risk, financial risk, and legal/regulatory risk.
            "#,
        )
        .field(
            "impact_analysis",
            FieldKind::Object(impact_analysis()),
            r#"
            **Impact Analysis Scores and Justifications**

            Impact analysis scores and detailed justifications, including member impact, game growth impact, brand impact, and sustainability impact.
            "#,
        )
        .field(
            "all_scores",
            FieldKind::array_of(score_kind()),
            r#"
            **All Scores**

            List of all scores, including strategic objectives, market analysis, financial analysis, operational feasibility, risk analysis, and impact analysis.
            "#,
        )
        .field(
            "overall_score",
            FieldKind::Number,
            r#"
            **Overall Score**

            Overall score (an average of all scores, rounded to one decimal place), including strategic objectives, market analysis, financial analysis, operational feasibility, risk analysis, and impact analysis.
            "#,
        )
        .field(
            "overall_scores_narrative",
            FieldKind::String,
            r#"
            **Overall Scores Narrative**

            Narrative summary of most significant drivers / factors for the overall score.
            "#,
        )
}
