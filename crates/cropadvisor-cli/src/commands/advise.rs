//! Advise command implementation

use crate::cli::AdviseArgs;
use crate::config_loader::load_config_with_overrides;
use crate::errors;
use crate::form::{FormController, InputSource, Outcome, ScriptedInput};
use crate::interactive::PromptInput;
use crate::output::OutputWriter;
use crate::render::{failure_line, render_recommendation};
use anyhow::Result;
use cropadvisor_core::config::CliConfigOverrides;
use cropadvisor_core::models::{ManualInput, QueryInput};
use cropadvisor_model::RecommenderContext;
use std::path::Path;

pub fn execute(args: AdviseArgs, output: &OutputWriter, config_path: Option<&Path>) -> Result<()> {
    let overrides = CliConfigOverrides {
        currency_symbol: args.currency.clone(),
        ..Default::default()
    };
    let config = load_config_with_overrides(config_path, overrides)?;
    let currency = config.currency_symbol.value.clone();
    let defaults = config.manual_defaults();

    let context = RecommenderContext::builtin();
    let mut form = FormController::new(&context);

    let scripted = scripted_input(&args, &context, defaults)?;
    let interactive = scripted.is_none();

    let mut source: Box<dyn InputSource + '_> = match scripted {
        Some(input) => Box::new(ScriptedInput::once(input)),
        None => {
            if !output.is_json() {
                output.section("🌾 Crop Recommendation");
                output.line("Choose how you want to describe your farm.");
                println!();
            }
            Box::new(PromptInput::new(context.catalog(), defaults, !args.once))
        }
    };

    form.run(source.as_mut(), |outcome: &Outcome| match outcome {
        Ok(rec) => render_recommendation(output, rec, &currency),
        Err(failure) if interactive => {
            output.error(failure_line(failure));
            Ok(())
        }
        Err(failure) => Err(errors::prediction_failed(failure).into()),
    })?;

    if interactive && form.submissions() == 0 {
        output.info("No recommendation requested.");
    }

    Ok(())
}

/// Submission given entirely by flags, if any
fn scripted_input(
    args: &AdviseArgs,
    context: &RecommenderContext,
    defaults: ManualInput,
) -> Result<Option<QueryInput>> {
    if let Some(ref name) = args.district {
        let catalog = context.catalog();
        let record = catalog
            .find_district(name)
            .ok_or_else(|| errors::unknown_district(name, catalog.districts()))?;
        return Ok(Some(QueryInput::District(record.district.clone())));
    }

    if args.has_manual_values() {
        let manual = ManualInput::new(
            args.rainfall.unwrap_or(defaults.rainfall_mm),
            args.temperature.unwrap_or(defaults.temperature_c),
            args.soil_ph.unwrap_or(defaults.soil_ph),
        );
        return Ok(Some(QueryInput::Manual(manual)));
    }

    Ok(None)
}
