//! Current versus next scheduled wage of a scale step.

use chrono::NaiveDate;

use crate::config::WageScaleTable;
use crate::error::EngineResult;
use crate::models::{ProjectedProgression, StepWage};

use super::forward::resolve_forward;
use super::progression::get_progression;

/// Annotates a step's progression with the wage in force on `as_of`, the
/// next scheduled wage and the wage one step up.
///
/// # Examples
///
/// ```no_run
/// use cao_engine::config::ConfigLoader;
/// use cao_engine::resolution::project_progression;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/cao_vvt")?;
/// let as_of = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
/// let projection = project_progression(loader.table(), 6, 2, as_of)?;
///
/// if let Some(next) = &projection.next_scheduled {
///     println!("Next raise on {}", next.effective_date);
/// }
/// # Ok::<(), cao_engine::error::EngineError>(())
/// ```
pub fn project_progression(
    table: &WageScaleTable,
    scale: u32,
    step: u32,
    as_of: NaiveDate,
) -> EngineResult<ProjectedProgression> {
    let points = get_progression(table, scale, step)?;

    let current = points
        .iter()
        .rfind(|p| p.effective_date <= as_of)
        .cloned();
    let next_scheduled = points.iter().find(|p| p.effective_date > as_of).cloned();
    let increase_to_next = match (&current, &next_scheduled) {
        (Some(current), Some(next)) => Some(next.wage - current.wage),
        _ => None,
    };

    let max_step = table.scale(scale)?.max_step;
    let next_step = if step < max_step {
        resolve_forward(table, scale, step + 1, as_of)
            .ok()
            .map(|resolved| StepWage {
                step_number: resolved.step_number,
                effective_date: resolved.effective_date,
                wage: resolved.wage,
            })
    } else {
        None
    };

    Ok(ProjectedProgression {
        scale_number: scale,
        step_number: step,
        as_of,
        points,
        current,
        next_scheduled,
        increase_to_next,
        next_step,
    })
}
