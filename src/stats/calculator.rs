//! Statistics Calculator Module
//! KPI scalars and chart-ready tables computed over the filtered view.

use crate::data::{FilteredView, SalaryRecord};
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, HashMap};

/// Headline figures.
#[derive(Debug, Clone, PartialEq)]
pub struct Kpis {
    pub average_usd: f64,
    pub max_usd: f64,
    pub record_count: usize,
    pub most_common_role: String,
}

impl Kpis {
    /// Fallback shown when the filtered view is empty.
    pub fn empty() -> Self {
        Self {
            average_usd: 0.0,
            max_usd: 0.0,
            record_count: 0,
            most_common_role: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleAverage {
    pub role: String,
    pub mean_usd: f64,
    pub count: usize,
}

/// Half-open `[lower, upper)` bin, except the last which includes `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkModelShare {
    pub work_model: String,
    pub count: usize,
    /// Share of the filtered view, 0..=100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryAverage {
    pub iso3: String,
    pub mean_usd: f64,
    pub count: usize,
}

/// Chart region identity, used in "no data" notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    TopRoles,
    SalaryDistribution,
    WorkModel,
    Countries,
}

impl ChartKind {
    fn subject(self) -> &'static str {
        match self {
            ChartKind::TopRoles => "roles",
            ChartKind::SalaryDistribution => "salary distribution",
            ChartKind::WorkModel => "work model",
            ChartKind::Countries => "countries",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

/// Why a chart region shows a message instead of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The filtered view itself is empty.
    NoData(ChartKind),
    /// The view has rows, but none for the spotlighted role.
    NoRoleRecords(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::NoData(kind) => format!("No data available for {}.", kind.subject()),
            Notice::NoRoleRecords(role) => format!("No {role} records in the current filter."),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Notice::NoData(_) => Severity::Warning,
            Notice::NoRoleRecords(_) => Severity::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartState<T> {
    Ready(T),
    Empty(Notice),
}

impl<T> ChartState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ChartState::Ready(data) => Some(data),
            ChartState::Empty(_) => None,
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        match self {
            ChartState::Ready(_) => None,
            ChartState::Empty(notice) => Some(notice),
        }
    }
}

/// Knobs for the chart tables.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSettings {
    pub histogram_bins: usize,
    pub top_roles: usize,
    pub spotlight_role: String,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            top_roles: 10,
            spotlight_role: "Data Scientist".to_string(),
        }
    }
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub kpis: Kpis,
    pub top_roles: ChartState<Vec<RoleAverage>>,
    pub histogram: ChartState<Vec<HistogramBin>>,
    pub work_models: ChartState<Vec<WorkModelShare>>,
    pub countries: ChartState<Vec<CountryAverage>>,
}

/// Read-only computations over a filtered view.
pub struct StatsCalculator;

impl StatsCalculator {
    pub fn snapshot(view: &FilteredView, settings: &AggregationSettings) -> DashboardSnapshot {
        DashboardSnapshot {
            kpis: Self::kpis(view),
            top_roles: Self::top_roles(view, settings.top_roles),
            histogram: Self::histogram(view, settings.histogram_bins),
            work_models: Self::work_models(view),
            countries: Self::country_averages(view, &settings.spotlight_role),
        }
    }

    pub fn kpis(view: &FilteredView) -> Kpis {
        if view.is_empty() {
            return Kpis::empty();
        }

        let usd = Self::usd_values(view.iter());
        let (average_usd, max_usd) = if usd.is_empty() {
            (0.0, 0.0)
        } else {
            (Statistics::mean(&usd), Statistics::max(&usd))
        };

        Kpis {
            average_usd,
            max_usd,
            record_count: view.len(),
            most_common_role: Self::most_common_role(view.iter()),
        }
    }

    /// Most frequent non-null role; ties go to the role seen first.
    pub fn most_common_role<'a>(records: impl Iterator<Item = &'a SalaryRecord>) -> String {
        let mut order: Vec<(&str, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for role in records.filter_map(|r| non_blank(&r.role)) {
            let slot = *index.entry(role).or_insert_with(|| {
                order.push((role, 0));
                order.len() - 1
            });
            order[slot].1 += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for (role, count) in order {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((role, count));
            }
        }
        best.map(|(role, _)| role.to_string()).unwrap_or_default()
    }

    /// The `n` roles with the highest mean USD, returned ascending by mean.
    pub fn top_roles(view: &FilteredView, n: usize) -> ChartState<Vec<RoleAverage>> {
        if view.is_empty() {
            return ChartState::Empty(Notice::NoData(ChartKind::TopRoles));
        }

        let mut groups = Self::group_means(view.iter(), |r| non_blank(&r.role))
            .into_iter()
            .map(|(role, mean_usd, count)| RoleAverage {
                role,
                mean_usd,
                count,
            })
            .collect::<Vec<_>>();
        if groups.is_empty() {
            return ChartState::Empty(Notice::NoData(ChartKind::TopRoles));
        }

        // Stable sorts keep first-seen order among equal means.
        groups.sort_by(|a, b| b.mean_usd.total_cmp(&a.mean_usd));
        groups.truncate(n);
        groups.sort_by(|a, b| a.mean_usd.total_cmp(&b.mean_usd));
        ChartState::Ready(groups)
    }

    /// Equal-width bins spanning `[min, max]` of the view's USD values.
    pub fn histogram(view: &FilteredView, bins: usize) -> ChartState<Vec<HistogramBin>> {
        if view.is_empty() {
            return ChartState::Empty(Notice::NoData(ChartKind::SalaryDistribution));
        }
        ChartState::Ready(Self::bin_values(&Self::usd_values(view.iter()), bins))
    }

    pub fn bin_values(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }

        let (mut lo, mut hi) = (Statistics::min(values), Statistics::max(values));
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins {
                    hi
                } else {
                    lo + width * (i + 1) as f64
                },
                count,
            })
            .collect()
    }

    /// Records per work model, most frequent first. Shares are over rows
    /// that have a work model.
    pub fn work_models(view: &FilteredView) -> ChartState<Vec<WorkModelShare>> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for model in view.iter().filter_map(|r| non_blank(&r.work_model)) {
            match counts.iter_mut().find(|(seen, _)| *seen == model) {
                Some((_, count)) => *count += 1,
                None => counts.push((model.to_string(), 1)),
            }
        }
        if counts.is_empty() {
            return ChartState::Empty(Notice::NoData(ChartKind::WorkModel));
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let total = counts.iter().map(|(_, count)| count).sum::<usize>() as f64;
        ChartState::Ready(
            counts
                .into_iter()
                .map(|(work_model, count)| WorkModelShare {
                    work_model,
                    count,
                    percent: count as f64 / total * 100.0,
                })
                .collect(),
        )
    }

    /// Mean USD per country for one role, sorted by ISO3 code.
    pub fn country_averages(view: &FilteredView, role: &str) -> ChartState<Vec<CountryAverage>> {
        if view.is_empty() {
            return ChartState::Empty(Notice::NoData(ChartKind::Countries));
        }

        let spotlight: Vec<&SalaryRecord> = view.iter().filter(|r| r.role == role).collect();
        if spotlight.is_empty() {
            return ChartState::Empty(Notice::NoRoleRecords(role.to_string()));
        }

        let mut by_country: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for record in spotlight.iter().filter(|r| r.has_iso3()) {
            if let Some(usd) = record.usd {
                let entry = by_country.entry(record.country_iso3.as_str()).or_default();
                entry.0 += usd;
                entry.1 += 1;
            }
        }

        ChartState::Ready(
            by_country
                .into_iter()
                .map(|(iso3, (sum, count))| CountryAverage {
                    iso3: iso3.to_string(),
                    mean_usd: sum / count as f64,
                    count,
                })
                .collect(),
        )
    }

    fn usd_values<'a>(records: impl Iterator<Item = &'a SalaryRecord>) -> Vec<f64> {
        records.filter_map(|r| r.usd).collect()
    }

    /// `(key, mean usd, n)` per key in first-seen order; keys with no USD values are dropped.
    fn group_means<'a>(
        records: impl Iterator<Item = &'a SalaryRecord>,
        key: impl Fn(&'a SalaryRecord) -> Option<&'a str>,
    ) -> Vec<(String, f64, usize)> {
        let mut groups: Vec<(String, f64, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for record in records {
            let (Some(k), Some(usd)) = (key(record), record.usd) else {
                continue;
            };
            let slot = *index.entry(k).or_insert_with(|| {
                groups.push((k.to_string(), 0.0, 0));
                groups.len() - 1
            });
            groups[slot].1 += usd;
            groups[slot].2 += 1;
        }
        groups
            .into_iter()
            .map(|(k, sum, n)| (k, sum / n as f64, n))
            .collect()
    }
}

/// Null text cells are stored as `""` and never form a group.
fn non_blank(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FilterOptions, FilterSelection, SalaryTable};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn row(role: &str, usd: f64) -> SalaryRecord {
        SalaryRecord {
            year: Some(2024),
            seniority: "senior".into(),
            contract_type: "full time".into(),
            company_size: "medium".into(),
            work_model: "remote".into(),
            country_iso3: "USA".into(),
            role: role.into(),
            usd: Some(usd),
            ..Default::default()
        }
    }

    fn view_of(records: Vec<SalaryRecord>) -> FilteredView {
        let table = Arc::new(SalaryTable::from_records(records).unwrap());
        let options = FilterOptions::from_records(table.records());
        FilteredView::apply(&table, &FilterSelection::all(&options))
    }

    fn empty_view() -> FilteredView {
        let table = Arc::new(SalaryTable::from_records(vec![row("A", 1.0)]).unwrap());
        FilteredView::apply(&table, &FilterSelection::default())
    }

    #[test]
    fn kpis_for_small_table() {
        let view = view_of(vec![row("A", 100.0), row("A", 200.0), row("B", 300.0)]);
        assert_eq!(
            StatsCalculator::kpis(&view),
            Kpis {
                average_usd: 200.0,
                max_usd: 300.0,
                record_count: 3,
                most_common_role: "A".into(),
            }
        );
    }

    #[test]
    fn kpis_fall_back_on_empty_view() {
        let kpis = StatsCalculator::kpis(&empty_view());
        assert_eq!(kpis, Kpis::empty());
        assert!(!kpis.average_usd.is_nan());
    }

    #[test]
    fn missing_usd_counts_as_a_record_but_not_in_means() {
        let mut blank = row("B", 0.0);
        blank.usd = None;
        let view = view_of(vec![row("A", 100.0), blank]);
        let kpis = StatsCalculator::kpis(&view);
        assert_eq!(kpis.record_count, 2);
        assert_eq!(kpis.average_usd, 100.0);
    }

    #[test]
    fn mode_ties_go_to_first_seen() {
        let records = [row("B", 1.0), row("A", 1.0), row("A", 1.0), row("B", 1.0)];
        assert_eq!(StatsCalculator::most_common_role(records.iter()), "B");
        assert_eq!(StatsCalculator::most_common_role([].iter()), "");
    }

    #[test]
    fn top_roles_are_capped_and_ascending() {
        let records: Vec<SalaryRecord> = (0..15)
            .map(|i| row(&format!("role-{i}"), 1000.0 * (i + 1) as f64))
            .collect();
        let view = view_of(records);
        let top = StatsCalculator::top_roles(&view, 10);
        let top = top.ready().unwrap();

        assert_eq!(top.len(), 10);
        assert_eq!(top.first().unwrap().role, "role-5");
        assert_eq!(top.last().unwrap().role, "role-14");
        assert!(top.windows(2).all(|w| w[0].mean_usd <= w[1].mean_usd));
        assert!(top.iter().all(|t| view.iter().any(|r| r.role == t.role)));
    }

    #[test]
    fn top_roles_average_each_group() {
        let view = view_of(vec![row("A", 100.0), row("A", 200.0), row("B", 300.0)]);
        let top = StatsCalculator::top_roles(&view, 10);
        assert_eq!(
            top,
            ChartState::Ready(vec![
                RoleAverage {
                    role: "A".into(),
                    mean_usd: 150.0,
                    count: 2
                },
                RoleAverage {
                    role: "B".into(),
                    mean_usd: 300.0,
                    count: 1
                },
            ])
        );
    }

    #[test]
    fn histogram_spans_min_to_max() {
        let values: Vec<f64> = (0..=30).map(|i| i as f64 * 10.0).collect();
        let bins = StatsCalculator::bin_values(&values, 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[29].upper, 300.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        // The maximum lands in the last, closed bin.
        assert_eq!(bins[29].count, 2);
    }

    #[test]
    fn histogram_of_identical_values_uses_unit_range() {
        let bins = StatsCalculator::bin_values(&[5.0, 5.0], 30);
        assert_eq!(bins[0].lower, 4.5);
        assert_eq!(bins[29].upper, 5.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn work_models_are_counted_with_shares() {
        let mut onsite = row("A", 1.0);
        onsite.work_model = "onsite".into();
        let view = view_of(vec![onsite, row("A", 1.0), row("B", 1.0), row("C", 1.0)]);
        let shares = StatsCalculator::work_models(&view);
        assert_eq!(
            shares,
            ChartState::Ready(vec![
                WorkModelShare {
                    work_model: "remote".into(),
                    count: 3,
                    percent: 75.0
                },
                WorkModelShare {
                    work_model: "onsite".into(),
                    count: 1,
                    percent: 25.0
                },
            ])
        );
    }

    #[test]
    fn country_means_for_spotlight_role() {
        let mut br = row("Data Scientist", 50.0);
        br.country_iso3 = "BRA".into();
        let mut invalid = row("Data Scientist", 999.0);
        invalid.country_iso3 = "??".into();
        let view = view_of(vec![
            row("Data Scientist", 100.0),
            row("Data Scientist", 300.0),
            br,
            invalid,
            row("data scientist", 1.0),
        ]);

        let countries = StatsCalculator::country_averages(&view, "Data Scientist");
        assert_eq!(
            countries,
            ChartState::Ready(vec![
                CountryAverage {
                    iso3: "BRA".into(),
                    mean_usd: 50.0,
                    count: 1
                },
                CountryAverage {
                    iso3: "USA".into(),
                    mean_usd: 200.0,
                    count: 2
                },
            ])
        );
    }

    #[test]
    fn missing_spotlight_role_is_informational() {
        let view = view_of(vec![row("Data Engineer", 1.0)]);
        let state = StatsCalculator::country_averages(&view, "Data Scientist");
        let notice = state.notice().unwrap();
        assert_eq!(notice.severity(), Severity::Info);
        assert_eq!(
            notice.message(),
            "No Data Scientist records in the current filter."
        );
    }

    #[test]
    fn empty_view_shows_no_data_everywhere() {
        let snapshot = StatsCalculator::snapshot(&empty_view(), &AggregationSettings::default());
        assert_eq!(snapshot.kpis, Kpis::empty());
        assert_eq!(
            snapshot.top_roles.notice().map(Notice::message).as_deref(),
            Some("No data available for roles.")
        );
        assert_eq!(
            snapshot.histogram.notice(),
            Some(&Notice::NoData(ChartKind::SalaryDistribution))
        );
        assert_eq!(
            snapshot.work_models.notice(),
            Some(&Notice::NoData(ChartKind::WorkModel))
        );
        let countries = snapshot.countries.notice().unwrap();
        assert_eq!(countries.severity(), Severity::Warning);
        assert_eq!(countries.message(), "No data available for countries.");
    }

    #[test]
    fn company_size_outside_the_data_empties_every_chart() {
        let table = Arc::new(
            SalaryTable::from_records(vec![row("Data Scientist", 100.0), row("A", 200.0)])
                .unwrap(),
        );
        let options = FilterOptions::from_records(table.records());
        let selection = FilterSelection {
            company_sizes: BTreeSet::from(["gigantic".to_string()]),
            ..FilterSelection::all(&options)
        };
        let view = FilteredView::apply(&table, &selection);
        let snapshot = StatsCalculator::snapshot(&view, &AggregationSettings::default());

        assert_eq!(snapshot.kpis, Kpis::empty());
        assert_eq!(
            snapshot.top_roles,
            ChartState::Empty(Notice::NoData(ChartKind::TopRoles))
        );
        assert_eq!(
            snapshot.histogram,
            ChartState::Empty(Notice::NoData(ChartKind::SalaryDistribution))
        );
        assert_eq!(
            snapshot.work_models,
            ChartState::Empty(Notice::NoData(ChartKind::WorkModel))
        );
        assert_eq!(
            snapshot.countries,
            ChartState::Empty(Notice::NoData(ChartKind::Countries))
        );
    }

    #[test]
    fn equal_means_at_the_cut_keep_first_seen_order() {
        let records: Vec<SalaryRecord> = [
            ("T2", 100.0),
            ("A", 900.0),
            ("T4", 100.0),
            ("B", 800.0),
            ("T1", 100.0),
            ("C", 700.0),
            ("T3", 100.0),
            ("D", 600.0),
            ("E", 500.0),
            ("F", 400.0),
            ("G", 300.0),
            ("H", 200.0),
        ]
        .iter()
        .map(|&(role, usd)| row(role, usd))
        .collect();

        let top = StatsCalculator::top_roles(&view_of(records), 10);
        let roles: Vec<&str> = top
            .ready()
            .unwrap()
            .iter()
            .map(|r| r.role.as_str())
            .collect();
        assert_eq!(
            roles,
            vec!["T2", "T4", "H", "G", "F", "E", "D", "C", "B", "A"]
        );
    }

    #[test]
    fn null_roles_are_neither_mode_nor_bar() {
        let blank = row("", 500.0);
        let view = view_of(vec![
            blank.clone(),
            blank,
            row("Data Analyst", 100.0),
            row("Data Analyst", 100.0),
        ]);

        let kpis = StatsCalculator::kpis(&view);
        assert_eq!(kpis.most_common_role, "Data Analyst");
        assert_eq!(kpis.record_count, 4);
        assert_eq!(
            StatsCalculator::top_roles(&view, 10),
            ChartState::Ready(vec![RoleAverage {
                role: "Data Analyst".into(),
                mean_usd: 100.0,
                count: 2
            }])
        );
    }

    #[test]
    fn work_model_shares_skip_null_cells() {
        let mut blank = row("A", 1.0);
        blank.work_model = String::new();
        let view = view_of(vec![blank.clone(), blank.clone(), blank.clone(), row("A", 1.0)]);
        assert_eq!(
            StatsCalculator::work_models(&view),
            ChartState::Ready(vec![WorkModelShare {
                work_model: "remote".into(),
                count: 1,
                percent: 100.0
            }])
        );

        let only_blank = view_of(vec![blank]);
        assert_eq!(
            StatsCalculator::work_models(&only_blank),
            ChartState::Empty(Notice::NoData(ChartKind::WorkModel))
        );
    }
}
