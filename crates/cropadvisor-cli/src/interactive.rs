use crate::form::InputSource;
use anyhow::Result;
use cropadvisor_core::models::{Catalog, Feature, InputMode, ManualInput, QueryInput};
use dialoguer::{Confirm, Input, Select};

const SUBMIT_PROMPT: &str = "✅ Get Crop Recommendation";
const AGAIN_PROMPT: &str = "Get another recommendation?";

/// The individual questions the form asks
pub trait Prompts {
    fn choose_mode(&mut self) -> Result<InputMode>;

    /// Index into `districts`
    fn choose_district(&mut self, districts: &[&str]) -> Result<usize>;

    fn enter_number(&mut self, prompt: &str, feature: Feature, default: f64) -> Result<f64>;

    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Prompts on the terminal through dialoguer
pub struct TerminalPrompts;

impl Prompts for TerminalPrompts {
    fn choose_mode(&mut self) -> Result<InputMode> {
        let labels: Vec<&str> = InputMode::ALL.iter().map(|m| m.label()).collect();
        let idx = Select::new()
            .with_prompt("Choose input type")
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(InputMode::ALL[idx])
    }

    fn choose_district(&mut self, districts: &[&str]) -> Result<usize> {
        let idx = Select::new()
            .with_prompt("Choose your District")
            .items(districts)
            .default(0)
            .interact()?;
        Ok(idx)
    }

    fn enter_number(&mut self, prompt: &str, feature: Feature, default: f64) -> Result<f64> {
        let bounds = feature.bounds();
        let value: f64 = Input::new()
            .with_prompt(format!(
                "{} ({}, {} to {})",
                prompt,
                feature.unit(),
                bounds.min,
                bounds.max
            ))
            .default(default)
            .interact_text()?;
        Ok(value)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = Confirm::new().with_prompt(prompt).default(true).interact()?;
        Ok(answer)
    }
}

/// Form fields collected with prompts
pub struct PromptInput<'a, P = TerminalPrompts> {
    prompts: P,
    catalog: &'a Catalog,
    defaults: ManualInput,
    repeat: bool,
    submitted: bool,
}

impl<'a> PromptInput<'a> {
    /// `repeat` offers another submission after each one
    pub fn new(catalog: &'a Catalog, defaults: ManualInput, repeat: bool) -> Self {
        Self::with_prompts(TerminalPrompts, catalog, defaults, repeat)
    }
}

impl<'a, P: Prompts> PromptInput<'a, P> {
    pub fn with_prompts(
        prompts: P,
        catalog: &'a Catalog,
        defaults: ManualInput,
        repeat: bool,
    ) -> Self {
        Self { prompts, catalog, defaults, repeat, submitted: false }
    }

    fn fill_district(&mut self) -> Result<QueryInput> {
        let catalog = self.catalog;
        let districts: Vec<&str> = catalog.districts().collect();
        let idx = self.prompts.choose_district(&districts)?;
        let name = districts
            .get(idx)
            .ok_or_else(|| anyhow::anyhow!("No district at position {}", idx))?;
        Ok(QueryInput::District(name.to_string()))
    }

    fn fill_manual(&mut self) -> Result<QueryInput> {
        let rainfall = self.prompts.enter_number(
            "🌧️ Enter average Rainfall",
            Feature::Rainfall,
            self.defaults.rainfall_mm,
        )?;
        let temperature = self.prompts.enter_number(
            "🌡️ Enter average Temperature",
            Feature::Temperature,
            self.defaults.temperature_c,
        )?;
        let soil_ph = self.prompts.enter_number(
            "🧪 Enter Soil pH",
            Feature::SoilPh,
            self.defaults.soil_ph,
        )?;

        Ok(QueryInput::Manual(ManualInput::new(rainfall, temperature, soil_ph)))
    }
}

impl<P: Prompts> InputSource for PromptInput<'_, P> {
    fn next_submission(&mut self) -> Result<Option<QueryInput>> {
        if self.submitted {
            if !self.repeat || !self.prompts.confirm(AGAIN_PROMPT)? {
                return Ok(None);
            }
            println!();
        }

        // Declining the submit button leaves the form open for new values
        loop {
            let input = match self.prompts.choose_mode()? {
                InputMode::District => self.fill_district()?,
                InputMode::Manual => self.fill_manual()?,
            };

            if self.prompts.confirm(SUBMIT_PROMPT)? {
                self.submitted = true;
                return Ok(Some(input));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormController, FormState};
    use cropadvisor_model::RecommenderContext;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct CannedAnswers {
        modes: VecDeque<InputMode>,
        districts: VecDeque<usize>,
        numbers: VecDeque<f64>,
        confirms: VecDeque<bool>,
        asked: Vec<String>,
    }

    impl Prompts for CannedAnswers {
        fn choose_mode(&mut self) -> Result<InputMode> {
            self.modes.pop_front().ok_or_else(|| anyhow::anyhow!("no mode left"))
        }

        fn choose_district(&mut self, _districts: &[&str]) -> Result<usize> {
            self.districts.pop_front().ok_or_else(|| anyhow::anyhow!("no district left"))
        }

        fn enter_number(&mut self, _prompt: &str, _feature: Feature, _default: f64) -> Result<f64> {
            self.numbers.pop_front().ok_or_else(|| anyhow::anyhow!("no number left"))
        }

        fn confirm(&mut self, prompt: &str) -> Result<bool> {
            self.asked.push(prompt.to_string());
            self.confirms.pop_front().ok_or_else(|| anyhow::anyhow!("no confirmation left"))
        }
    }

    #[test]
    fn test_declined_submit_prompts_again() {
        let catalog = Catalog::builtin();
        let answers = CannedAnswers {
            modes: VecDeque::from([InputMode::District, InputMode::Manual]),
            districts: VecDeque::from([5]),
            numbers: VecDeque::from([2400.0, 32.0, 5.8]),
            confirms: VecDeque::from([false, true]),
            ..Default::default()
        };
        let mut source =
            PromptInput::with_prompts(answers, &catalog, ManualInput::default(), false);

        let input = source.next_submission().unwrap();
        assert_eq!(input, Some(QueryInput::Manual(ManualInput::new(2400.0, 32.0, 5.8))));
        assert_eq!(source.prompts.asked, [SUBMIT_PROMPT, SUBMIT_PROMPT]);

        // single-shot form is done after one submission
        assert_eq!(source.next_submission().unwrap(), None);
    }

    #[test]
    fn test_declined_submit_keeps_form_waiting() {
        let ctx = RecommenderContext::builtin();
        let answers = CannedAnswers {
            modes: VecDeque::from([InputMode::District, InputMode::District]),
            districts: VecDeque::from([0, 5]),
            confirms: VecDeque::from([false, true]),
            ..Default::default()
        };
        let mut source =
            PromptInput::with_prompts(answers, ctx.catalog(), ManualInput::default(), false);
        let mut form = FormController::new(&ctx);

        let mut crops = Vec::new();
        form.run(&mut source, |outcome| {
            crops.push(outcome.as_ref().map(|r| r.best.crop.clone()).unwrap_or_default());
            Ok(())
        })
        .unwrap();

        assert_eq!(form.submissions(), 1);
        assert_eq!(form.state(), FormState::Rendered);
        assert_eq!(crops, ["Sugarcane"]);
    }

    #[test]
    fn test_repeat_asks_before_next_submission() {
        let catalog = Catalog::builtin();
        let answers = CannedAnswers {
            modes: VecDeque::from([InputMode::District]),
            districts: VecDeque::from([0]),
            confirms: VecDeque::from([true, false]),
            ..Default::default()
        };
        let mut source =
            PromptInput::with_prompts(answers, &catalog, ManualInput::default(), true);

        assert_eq!(
            source.next_submission().unwrap(),
            Some(QueryInput::District("Ludhiana".to_string()))
        );
        assert_eq!(source.next_submission().unwrap(), None);
        assert_eq!(source.prompts.asked, [SUBMIT_PROMPT, AGAIN_PROMPT]);
    }
}
