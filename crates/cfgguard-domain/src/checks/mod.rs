use crate::invariant::EvalContext;
use crate::model::Schema;
use crate::policy::EffectiveConfig;
use cfgguard_types::{EvalResult, Finding, InvariantResult};

mod contracts;
mod enum_values;
mod invariants;
mod required;


/// Everything a check may look at. Evaluator results are computed once by the engine.
pub struct CheckInput<'a> {
    pub schema: &'a Schema,
    pub ctx: &'a EvalContext,
    pub invariants: &'a [InvariantResult],
    pub contract: Option<&'a EvalResult>,
}

pub fn run_all(input: &CheckInput<'_>, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    required::run(input, cfg, out);
    enum_values::run(input, cfg, out);
    invariants::run(input, cfg, out);
    contracts::run(input, cfg, out);
}
