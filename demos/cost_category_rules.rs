//! Defining a cost category from tag rules
//!
//! Run with `cargo run --example cost_category_rules`.

use costexp::{
    CostExplorerError, Expression, TagValues, Validate, WireEnum,
    model::cost_category::{CostCategoryRule, CreateCostCategoryDefinitionRequest},
    model::operation::encode_request,
};
use costexp_core::enums::CostCategoryRuleVersion;

fn team_rule(value: &str, teams: &[&str]) -> CostCategoryRule {
    CostCategoryRule::new(value, TagValues::new("team", teams.iter().copied()).into())
}

fn main() -> Result<(), CostExplorerError> {
    let rules = vec![
        team_rule("Web", &["web", "frontend"]),
        team_rule("Data", &["data", "analytics"]),
        // Shared infrastructure is anything tagged platform or ops
        CostCategoryRule::new(
            "Platform",
            Expression::or([
                TagValues::new("team", ["platform"]).into(),
                TagValues::new("team", ["ops"]).into(),
            ]),
        ),
    ];

    let request = CreateCostCategoryDefinitionRequest::new(
        "Team",
        CostCategoryRuleVersion::CostCategoryExpressionV1,
        rules,
    );
    request.validate().into_result()?;

    println!(
        "Cost category '{}' ({}) with {} rule(s):",
        request.name,
        request.rule_version.as_str(),
        request.rules.len()
    );
    for rule in &request.rules {
        let predicates = rule.rule.as_ref().map_or(0, |rule| rule.leaves().count());
        println!("  {:<10} {} predicate(s)", rule.value.as_deref().unwrap_or("-"), predicates);
    }

    let envelope = encode_request(&request)?;
    println!("\n{}", envelope.target);
    println!("{}", envelope.body);

    Ok(())
}
