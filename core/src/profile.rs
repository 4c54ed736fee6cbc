//! Customer profile sampling — static demographics and channel-usage
//! counters.
//!
//! Everything here is a pure independent draw: nothing depends on
//! simulation state, and the sampler never touches a customer again
//! after creation. The engine receives the profile plus an initial
//! financial posture and owns both from then on.

use crate::{
    catalog::{GeographyGenerator, OccupationGenerator},
    config::PopulationConfig,
    customer::FinancialState,
    ledger::Ledger,
    rng::StreamRng,
    types::{CustomerId, SimDay},
};
use chrono::{Datelike, Days, Months};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

const GENDERS: [Gender; 2] = [Gender::Male, Gender::Female];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Married,
    Single,
    Divorced,
    Widowed,
}

const MARITAL_STATUSES: [MaritalStatus; 4] = [
    MaritalStatus::Married,
    MaritalStatus::Single,
    MaritalStatus::Divorced,
    MaritalStatus::Widowed,
];

/// Assumes the customer at least finished school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "HS-grad")]
    HsGrad,
    #[serde(rename = "Some-college")]
    SomeCollege,
    Bachelors,
    Masters,
    Doctorate,
}

const EDUCATION_LEVELS: [EducationLevel; 5] = [
    EducationLevel::HsGrad,
    EducationLevel::SomeCollege,
    EducationLevel::Bachelors,
    EducationLevel::Masters,
    EducationLevel::Doctorate,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    FullTime,
    PartTime,
    SelfEmployed,
}

const EMPLOYMENT_STATUSES: [EmploymentStatus; 3] = [
    EmploymentStatus::FullTime,
    EmploymentStatus::PartTime,
    EmploymentStatus::SelfEmployed,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidentialStatus {
    Owns,
    Rent,
}

/// Channel-usage counters, sampled once per customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelUsage {
    pub calls_to_branch: u32,
    pub visits_to_branch: u32,
    pub mobile_entrances: u32,
    pub online_entrances: u32,
    pub atm_withdrawals: i64,
    pub atm_deposits: i64,
    pub calls_to_support: u32,
    pub adds_use: u32,
    /// Minutes on digital banking; None when the customer used neither
    /// the mobile nor the online channel.
    pub time_spent: Option<u32>,
    pub customer_feedback: u32,
}

/// Immutable-at-creation customer profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub customer_id: CustomerId,
    pub date_of_birth: SimDay,
    pub gender: Gender,
    pub geography: String,
    pub marital_status: MaritalStatus,
    pub education_level: EducationLevel,
    pub employment_status: EmploymentStatus,
    pub occupation: String,
    pub citizenship: bool,
    pub residential_status: ResidentialStatus,
    pub parental_status: bool,
    pub channels: ChannelUsage,
}

impl CustomerProfile {
    /// Whole-years age on `date`, floored, adjusted for a birthday not
    /// yet reached that year. Derived — never stored.
    pub fn age_on(&self, date: SimDay) -> i32 {
        let dob = self.date_of_birth;
        let mut age = date.year() - dob.year();
        if (date.month(), date.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age
    }
}

pub struct ProfileSampler<'a> {
    config: &'a PopulationConfig,
}

impl<'a> ProfileSampler<'a> {
    pub fn new(config: &'a PopulationConfig) -> Self {
        Self { config }
    }

    /// Sample one customer: immutable profile plus opening financial
    /// posture, both dated at the window start.
    pub fn sample(
        &self,
        customer_index: u64,
        start: SimDay,
        rng: &mut StreamRng,
    ) -> (CustomerProfile, FinancialState) {
        let p = self.config;
        let customer_id = format!("c-{customer_index:06}");

        let age_years = p.age_range.sample(rng);
        let date_of_birth = sample_date_of_birth(start, age_years, rng);

        let gender = GENDERS[rng.weighted(&p.gender_weights)];
        let geography = GeographyGenerator::generate_address(rng);
        let marital_status = MARITAL_STATUSES[rng.weighted(&p.marital_weights)];
        let education_level = sample_education(age_years as i32, rng);
        let employment_status = EMPLOYMENT_STATUSES[rng.weighted(&p.employment_weights)];
        let occupation = OccupationGenerator::generate(rng).to_string();
        let citizenship = rng.chance(p.citizenship_probability);
        let residential_status = if rng.chance(p.owner_probability) {
            ResidentialStatus::Owns
        } else {
            ResidentialStatus::Rent
        };
        let parental_status = rng.chance(p.parental_probability);

        let month_income = p.month_income.sample(rng) as f64;
        let mut current_balance = p.opening_balance.sample(rng) as f64;
        if start.day() == 1 {
            // A run starting on a salary day opens with that month's
            // salary already received.
            current_balance += month_income;
        }

        // ATM adjustments: a withdrawal larger than the balance never
        // happened; a deposit larger than the balance likewise.
        let mut atm_withdrawals = p.atm_amount.sample(rng);
        if atm_withdrawals as f64 > current_balance {
            atm_withdrawals = 0;
        }
        current_balance -= atm_withdrawals as f64;
        let mut atm_deposits = p.atm_amount.sample(rng);
        if atm_deposits as f64 > current_balance {
            atm_deposits = 0;
        }
        current_balance += atm_deposits as f64;

        let mobile_entrances = rng.next_u64_below(p.mobile_entrances_max) as u32;
        let online_entrances = rng.next_u64_below(p.online_entrances_max) as u32;
        let time_spent = if mobile_entrances != 0 || online_entrances != 0 {
            Some(p.digital_session_minutes.sample(rng) as u32)
        } else {
            None
        };

        let channels = ChannelUsage {
            calls_to_branch: rng.weighted(&p.branch_call_weights) as u32,
            visits_to_branch: rng.chance(p.branch_visit_probability) as u32,
            mobile_entrances,
            online_entrances,
            atm_withdrawals,
            atm_deposits,
            calls_to_support: rng.chance(p.support_call_probability) as u32,
            adds_use: rng.chance(p.ads_probability) as u32,
            time_spent,
            customer_feedback: rng.range_i64(0, p.feedback_max) as u32,
        };

        let profile = CustomerProfile {
            customer_id,
            date_of_birth,
            gender,
            geography,
            marital_status,
            education_level,
            employment_status,
            occupation,
            citizenship,
            residential_status,
            parental_status,
            channels,
        };

        let finances = FinancialState {
            current_balance,
            credit_score: p.credit_score.sample(rng) as i32,
            month_income,
            savings: p.savings_seed.sample(rng) as f64,
            investment: p.investment_seed.sample(rng) as f64,
            monthly_expenses: 0.0,
            loans_repayment: 0.0,
            payment_history: 0,
            borrowing_capacity: 0.0,
            ledger: Ledger::default(),
        };

        (profile, finances)
    }
}

/// A birthdate that makes the customer exactly `age_years` old at
/// `start`, with the day of year randomized.
fn sample_date_of_birth(start: SimDay, age_years: i64, rng: &mut StreamRng) -> SimDay {
    let offset_days = rng.next_u64_below(365);
    start
        .checked_sub_months(Months::new(age_years as u32 * 12))
        .and_then(|d| d.checked_sub_days(Days::new(offset_days)))
        .expect("date of birth before calendar epoch")
}

/// Education level gated by age: we know roughly at what age a person
/// can hold what maximum degree.
fn sample_education(age: i32, rng: &mut StreamRng) -> EducationLevel {
    let eligible: &[EducationLevel] = if age < 19 {
        &EDUCATION_LEVELS[..1]
    } else if age < 22 {
        &EDUCATION_LEVELS[..2]
    } else if age < 26 {
        &EDUCATION_LEVELS[..3]
    } else {
        &EDUCATION_LEVELS
    };
    *rng.pick(eligible)
}
