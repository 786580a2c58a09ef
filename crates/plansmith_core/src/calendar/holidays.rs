//! Holiday list assembly.

use crate::model::{Holiday, ProjectConfig};

/// Holidays in effect for a project.
///
/// Global holidays come first (only when enabled, minus exclusions), followed
/// by project-specific ones.
pub fn combined_holidays(global: &[Holiday], config: &ProjectConfig) -> Vec<Holiday> {
    let mut holidays = Vec::with_capacity(global.len() + config.project_specific_holidays.len());
    if config.use_global_holidays {
        holidays.extend(
            global
                .iter()
                .filter(|holiday| !config.excluded_global_holiday_ids.contains(&holiday.id))
                .cloned(),
        );
    }
    holidays.extend(config.project_specific_holidays.iter().cloned());
    holidays
}

#[cfg(test)]
mod tests {
    use super::combined_holidays;
    use crate::model::{Holiday, ProjectConfig};
    use chrono::NaiveDate;

    fn holiday(name: &str, day: u32) -> Holiday {
        Holiday::new(name, NaiveDate::from_ymd_opt(2024, 12, day).expect("valid date"))
    }

    #[test]
    fn excludes_disabled_and_excluded_globals() {
        let christmas = holiday("Christmas", 25);
        let boxing_day = holiday("Boxing day", 26);
        let company_day = holiday("Company day", 27);

        let mut config = ProjectConfig {
            excluded_global_holiday_ids: vec![boxing_day.id],
            project_specific_holidays: vec![company_day.clone()],
            ..ProjectConfig::default()
        };
        let globals = vec![christmas.clone(), boxing_day];

        let combined = combined_holidays(&globals, &config);
        assert_eq!(combined, vec![christmas, company_day.clone()]);

        config.use_global_holidays = false;
        assert_eq!(combined_holidays(&globals, &config), vec![company_day]);
    }
}
