//! Read-only reporting aggregates
//!
//! Everything here works off read snapshots and never mutates anything.
//! Raise guidance in particular is advisory output only; an actual raise
//! still has to go through the salary change service and its policy gate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

use crate::core::error::DomainResult;
use crate::db::HrStorage;
use crate::salary::SalaryPolicy;

/// Per-department headcount and salary aggregates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub department_id: String,
    pub name: String,
    pub headcount: usize,
    pub total_salary: Decimal,
    pub average_salary: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Decimal>,
    /// Salary total as a percentage of budget; absent without a budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_utilization_percent: Option<Decimal>,
}

/// One employee's standing in the performance ranking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRanking {
    pub employee_id: String,
    pub name: String,
    pub review_count: usize,
    pub average_rating: f64,
    /// Share of ranked employees at or below this average, 0..=100
    pub percentile: f64,
    /// Suggested raise percentage within the policy band, advisory only
    pub suggested_raise_percent: Decimal,
}

#[derive(Debug, Default, Clone)]
pub struct PerformanceQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub top: Option<usize>,
}

#[derive(Clone)]
pub struct ReportService {
    storage: HrStorage,
    policy: SalaryPolicy,
}

impl ReportService {
    pub fn new(storage: HrStorage, policy: SalaryPolicy) -> Self {
        Self { storage, policy }
    }

    /// Headcount, salary total/average and budget utilization per
    /// department. Only active employees count.
    pub fn department_summaries(&self) -> DomainResult<Vec<DepartmentSummary>> {
        let departments = self.storage.list_departments()?;
        let employees = self.storage.list_employees()?;

        let mut summaries = Vec::with_capacity(departments.len());
        for department in departments {
            let mut headcount = 0usize;
            let mut total_salary = Decimal::ZERO;
            for employee in employees
                .iter()
                .filter(|e| e.is_active && e.department_id == department.id)
            {
                headcount += 1;
                total_salary += employee.salary;
            }
            let average_salary = if headcount > 0 {
                (total_salary / Decimal::from(headcount)).round_dp(2)
            } else {
                Decimal::ZERO
            };
            let budget_utilization_percent = department.budget.and_then(|budget| {
                if budget > Decimal::ZERO {
                    Some((total_salary * Decimal::from(100) / budget).round_dp(2))
                } else {
                    None
                }
            });
            summaries.push(DepartmentSummary {
                department_id: department.id,
                name: department.name,
                headcount,
                total_salary,
                average_salary,
                budget: department.budget,
                budget_utilization_percent,
            });
        }
        Ok(summaries)
    }

    /// Rank active employees by average review rating over a review-date
    /// window, highest first. `top` truncates the result after ranking.
    pub fn performance_rankings(
        &self,
        query: &PerformanceQuery,
    ) -> DomainResult<Vec<PerformanceRanking>> {
        let employees = self.storage.list_employees()?;
        let reviews = self.storage.list_reviews(None)?;

        let mut per_employee: HashMap<&str, (usize, f64)> = HashMap::new();
        for review in &reviews {
            if let Some(start) = query.start_date {
                if review.review_date < start {
                    continue;
                }
            }
            if let Some(end) = query.end_date {
                if review.review_date > end {
                    continue;
                }
            }
            let entry = per_employee.entry(review.employee_id.as_str()).or_default();
            entry.0 += 1;
            entry.1 += review.average();
        }

        let mut rankings: Vec<PerformanceRanking> = employees
            .iter()
            .filter(|e| e.is_active)
            .filter_map(|employee| {
                let (count, sum) = per_employee.get(employee.id.as_str())?;
                let average = sum / *count as f64;
                Some(PerformanceRanking {
                    employee_id: employee.id.clone(),
                    name: employee.full_name(),
                    review_count: *count,
                    average_rating: (average * 100.0).round() / 100.0,
                    percentile: 0.0,
                    suggested_raise_percent: self.suggested_raise(average),
                })
            })
            .collect();

        let total = rankings.len();
        if total > 0 {
            let averages: Vec<f64> = rankings.iter().map(|r| r.average_rating).collect();
            for ranking in &mut rankings {
                let at_or_below = averages
                    .iter()
                    .filter(|a| **a <= ranking.average_rating)
                    .count();
                ranking.percentile = (at_or_below as f64 / total as f64 * 1000.0).round() / 10.0;
            }
        }

        rankings.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        if let Some(top) = query.top {
            rankings.truncate(top);
        }
        Ok(rankings)
    }

    /// Map an average rating (1..=5) onto a position inside the raise half
    /// of the policy band. A 1.0 average suggests 0%; a 5.0 average suggests
    /// the band maximum.
    fn suggested_raise(&self, average: f64) -> Decimal {
        let fraction = ((average - 1.0) / 4.0).clamp(0.0, 1.0);
        let fraction = Decimal::try_from(fraction).unwrap_or(Decimal::ZERO);
        (self.policy.max_percent_change * fraction).round_dp(2)
    }
}
