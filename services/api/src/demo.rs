use clap::Args;
use danger_signs::error::AppError;
use danger_signs::screening::facts::fields;
use danger_signs::screening::{
    DangerSignRegistry, DangerSignService, FactSet, FactValue, ScreeningOutcome,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Patient identifier attached to every alert
    #[arg(long)]
    pub(crate) patient_id: String,
    /// JSON file holding a fact object, e.g. {"systolicBP": 150, "urineProtein": "2+"}
    #[arg(long)]
    pub(crate) facts: Option<PathBuf>,
    /// Single field to screen; the facts file becomes context (bulk mode when omitted)
    #[arg(long, requires = "value")]
    pub(crate) field: Option<String>,
    /// Value for --field; numbers and booleans are detected, anything else is text
    #[arg(long, requires = "field", value_parser = crate::infra::parse_fact_value)]
    pub(crate) value: Option<FactValue>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Patient identifier used in the demo narratives
    #[arg(long, default_value = "ZMB-DEMO-0001")]
    pub(crate) patient_id: String,
    /// Skip the obstetric emergency scenario at the end of the walk-through
    #[arg(long)]
    pub(crate) skip_emergency: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        patient_id,
        facts,
        field,
        value,
    } = args;

    let service = DangerSignService::new(Arc::new(DangerSignRegistry::baseline()));
    let facts = match facts {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            serde_json::from_str::<FactSet>(&raw)?
        }
        None => FactSet::new(),
    };

    let outcome = match (field, value) {
        (Some(field), Some(value)) => {
            service.evaluate_field(&patient_id, &field, value, Some(&facts), None)?
        }
        _ => service.evaluate_symptoms(&patient_id, &facts, None)?,
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        patient_id,
        skip_emergency,
    } = args;

    let service = DangerSignService::new(Arc::new(DangerSignRegistry::baseline()));

    println!("Danger-sign screening demo");
    let catalog = service.categories();
    println!(
        "Rule coverage: {} rules ({} red / {} orange / {} yellow) across {} categories",
        catalog.counts.total,
        catalog.counts.red,
        catalog.counts.orange,
        catalog.counts.yellow,
        catalog.categories.len()
    );
    println!("Categories: {}", catalog.categories.join(", "));

    println!("\nScenario: routine antenatal visit, normal vitals");
    let normal = FactSet::new()
        .with(fields::SYSTOLIC_BP, 118)
        .with(fields::DIASTOLIC_BP, 76)
        .with(fields::HEMOGLOBIN, 12.1)
        .with(fields::OXYGEN_SATURATION, 98)
        .with(fields::FETAL_HEART_RATE, 140);
    render_outcome(&service.evaluate_symptoms(&patient_id, &normal, None)?);

    println!("\nScenario: mild anemia found on routine labs");
    let anemia = FactSet::new().with(fields::HEMOGLOBIN, 8.4);
    render_outcome(&service.evaluate_symptoms(&patient_id, &anemia, None)?);

    println!("\nScenario: blood pressure entered during an encounter");
    let context = FactSet::new().with(fields::URINE_PROTEIN, "2+");
    render_outcome(&service.evaluate_field(
        &patient_id,
        fields::SYSTOLIC_BP,
        FactValue::Number(152.0),
        Some(&context),
        None,
    )?);

    if !skip_emergency {
        println!("\nScenario: obstetric emergency, multiple danger signs");
        let emergency = FactSet::new()
            .with(fields::SYSTOLIC_BP, 150)
            .with(fields::DIASTOLIC_BP, 95)
            .with(fields::OXYGEN_SATURATION, 88)
            .with(fields::HEMOGLOBIN, 6.5)
            .with(fields::FETAL_HEART_RATE, 105)
            .with(fields::URINE_PROTEIN, "2+");
        render_outcome(&service.evaluate_symptoms(&patient_id, &emergency, None)?);
    }

    let health = service.health();
    println!(
        "\nService health: {} | {} rules loaded | up {}s | v{}",
        health.status, health.rules_loaded, health.uptime, health.version
    );

    Ok(())
}

fn render_outcome(outcome: &ScreeningOutcome) {
    if outcome.alerts.is_empty() {
        println!("- No danger signs detected");
        return;
    }

    println!(
        "- {} alert(s) | risk score {} | {} red / {} orange / {} yellow",
        outcome.alert_count,
        outcome.risk_score,
        outcome.summary.red,
        outcome.summary.orange,
        outcome.summary.yellow
    );
    for alert in &outcome.alerts {
        let referral = if alert.referral_required {
            " | referral required"
        } else {
            ""
        };
        println!(
            "  - [{:?}] {} ({:?}, urgency {:?}, risk {}){}",
            alert.severity,
            alert.alert_type,
            alert.category,
            alert.urgency,
            alert.risk_score,
            referral
        );
        println!("    {}", alert.message);
    }
}
