use crate::infra::{
    configured_evaluator, parse_availability, parse_blood_type, parse_date, parse_gender,
    parse_timestamp,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;
use std::collections::BTreeSet;
use std::path::PathBuf;
use thalai::care::{
    summarize, Appointment, CareSummary, MedicationDose, PatientSnapshot, TransfusionSchedule,
};
use thalai::eligibility::{
    compatibility_matrix, compatible_donors, AvailabilitySlot, BloodRequest, BloodType,
    DonorProfile, EligibilityEvaluator, EligibilityVerdict, Gender, RequestClassification,
};
use thalai::error::AppError;
use thalai::roster::{screen_roster, DonorRosterImporter};

#[derive(Args, Debug)]
pub(crate) struct DonorCheckArgs {
    /// Donor's full name
    #[arg(long)]
    pub(crate) name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date_of_birth: NaiveDate,
    /// male, female, or other
    #[arg(long, value_parser = parse_gender)]
    pub(crate) gender: Gender,
    /// ABO/Rh code such as O- or AB+
    #[arg(long)]
    pub(crate) blood_type: String,
    /// Body weight in kilograms
    #[arg(long)]
    pub(crate) weight_kg: f64,
    /// Most recent donation (YYYY-MM-DD); omit for first-time donors
    #[arg(long, value_parser = parse_date)]
    pub(crate) last_donation: Option<NaiveDate>,
    /// Availability slot; repeat for several (weekdays, weekends, emergency-only, anytime)
    #[arg(long = "availability", value_parser = parse_availability)]
    pub(crate) availability: Vec<AvailabilitySlot>,
    /// Donor accepted the terms of service
    #[arg(long)]
    pub(crate) consent_terms: bool,
    /// Donor agreed to share contact details with recipients
    #[arg(long)]
    pub(crate) consent_data_sharing: bool,
    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct RequestClassifyArgs {
    /// Requested ABO/Rh code
    #[arg(long)]
    pub(crate) blood_type: String,
    /// Units of blood needed (1-10)
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) units: i64,
    /// critical, urgent, or routine
    #[arg(long)]
    pub(crate) urgency: String,
    /// When the blood is needed (RFC 3339 or YYYY-MM-DDTHH:MM in UTC)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) required_by: DateTime<Utc>,
    #[arg(long)]
    pub(crate) patient_name: String,
    #[arg(long)]
    pub(crate) contact_number: String,
    #[arg(long)]
    pub(crate) hospital: String,
    #[arg(long)]
    pub(crate) address: String,
    #[arg(long)]
    pub(crate) additional_info: Option<String>,
    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
}

#[derive(Args, Debug)]
pub(crate) struct CompatCheckArgs {
    /// Donor blood type
    #[arg(long, value_parser = parse_blood_type)]
    pub(crate) donor: BloodType,
    /// Recipient blood type
    #[arg(long, value_parser = parse_blood_type)]
    pub(crate) recipient: BloodType,
}

#[derive(Args, Debug)]
pub(crate) struct RosterScreenArgs {
    /// Donor roster CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Only list donors who failed screening
    #[arg(long)]
    pub(crate) ineligible_only: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation instant for the demo (RFC 3339); defaults to now
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Skip the patient care summary portion of the demo.
    #[arg(long)]
    pub(crate) skip_care: bool,
}

pub(crate) fn run_donor_check(args: DonorCheckArgs) -> Result<(), AppError> {
    let DonorCheckArgs {
        name,
        date_of_birth,
        gender,
        blood_type,
        weight_kg,
        last_donation,
        availability,
        consent_terms,
        consent_data_sharing,
        as_of,
    } = args;

    let evaluator = configured_evaluator()?;
    let as_of = as_of.unwrap_or_else(Utc::now);
    let profile = DonorProfile {
        full_name: name,
        date_of_birth,
        gender,
        blood_type,
        weight_kg,
        last_donation_date: last_donation,
        availability: availability.into_iter().collect(),
        consent_terms,
        consent_data_sharing,
    };

    let verdict = evaluator.evaluate_donor(&profile, as_of);
    render_donor_verdict(&profile, &verdict, as_of);
    Ok(())
}

pub(crate) fn run_request_classify(args: RequestClassifyArgs) -> Result<(), AppError> {
    let RequestClassifyArgs {
        blood_type,
        units,
        urgency,
        required_by,
        patient_name,
        contact_number,
        hospital,
        address,
        additional_info,
        as_of,
    } = args;

    let evaluator = configured_evaluator()?;
    let as_of = as_of.unwrap_or_else(Utc::now);
    let request = BloodRequest {
        blood_type,
        units_needed: units,
        urgency,
        required_by,
        patient_name,
        contact_number,
        hospital,
        address,
        additional_info,
    };

    let classification = evaluator.classify_request(&request, as_of);
    render_request_classification(&request, &classification, as_of);
    Ok(())
}

pub(crate) fn run_compat_check(args: CompatCheckArgs) {
    let evaluator = EligibilityEvaluator::default();
    let compatible = evaluator.blood_type_compatibility(args.donor, args.recipient);
    let verdict = if compatible { "compatible" } else { "NOT compatible" };
    println!("{} -> {}: {}", args.donor, args.recipient, verdict);

    let donors: Vec<&str> = compatible_donors(args.recipient)
        .into_iter()
        .map(BloodType::label)
        .collect();
    println!(
        "{} recipients can receive from: {}",
        args.recipient,
        donors.join(", ")
    );
}

pub(crate) fn run_compat_matrix() {
    println!("Donor -> recipient compatibility");
    print!("{:>6}", "");
    for recipient in BloodType::ALL {
        print!("{:>5}", recipient.label());
    }
    println!();

    for row in compatibility_matrix() {
        print!("{:>6}", row.donor.label());
        for recipient in BloodType::ALL {
            let mark = if row.recipients.contains(&recipient) {
                "x"
            } else {
                "."
            };
            print!("{:>5}", mark);
        }
        println!();
    }
}

pub(crate) fn run_roster_screen(args: RosterScreenArgs) -> Result<(), AppError> {
    let RosterScreenArgs {
        csv,
        as_of,
        ineligible_only,
    } = args;

    let evaluator = configured_evaluator()?;
    let as_of = as_of.unwrap_or_else(Utc::now);
    let profiles = DonorRosterImporter::from_path(&csv)?;
    let screenings = screen_roster(&evaluator, &profiles, as_of);

    let eligible = screenings
        .iter()
        .filter(|screening| screening.verdict.eligible)
        .count();
    println!(
        "Roster {}: {} of {} donors eligible (evaluated {})",
        csv.display(),
        eligible,
        screenings.len(),
        as_of.to_rfc3339()
    );

    for screening in &screenings {
        if ineligible_only && screening.verdict.eligible {
            continue;
        }
        println!(
            "- {} ({}): {}",
            screening.full_name,
            screening.blood_type,
            screening.verdict.summary()
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, skip_care } = args;
    let as_of = as_of.unwrap_or_else(Utc::now);
    let evaluator = configured_evaluator()?;

    println!("ThalAI+ eligibility demo");

    for donor in sample_donors(as_of) {
        let verdict = evaluator.evaluate_donor(&donor, as_of);
        render_donor_verdict(&donor, &verdict, as_of);
    }

    for request in sample_requests(as_of) {
        let classification = evaluator.classify_request(&request, as_of);
        render_request_classification(&request, &classification, as_of);
    }

    println!();
    run_compat_matrix();

    if !skip_care {
        let summary = summarize(&sample_patient(as_of.date_naive()), as_of.date_naive());
        render_care_summary(&summary);
    }

    Ok(())
}

fn sample_donors(as_of: DateTime<Utc>) -> Vec<DonorProfile> {
    let today = as_of.date_naive();
    let years_ago = |years: i64| today - Duration::days(years * 365 + years / 4);

    vec![
        DonorProfile {
            full_name: "Meera Nair".to_string(),
            date_of_birth: years_ago(30),
            gender: Gender::Female,
            blood_type: "B+".to_string(),
            weight_kg: 50.0,
            last_donation_date: Some(today - Duration::days(60)),
            availability: BTreeSet::from([AvailabilitySlot::Anytime]),
            consent_terms: true,
            consent_data_sharing: true,
        },
        DonorProfile {
            full_name: "Arjun Das".to_string(),
            date_of_birth: years_ago(17),
            gender: Gender::Male,
            blood_type: "O-".to_string(),
            weight_kg: 44.0,
            last_donation_date: None,
            availability: BTreeSet::from([AvailabilitySlot::Weekends]),
            consent_terms: true,
            consent_data_sharing: false,
        },
    ]
}

fn sample_requests(as_of: DateTime<Utc>) -> Vec<BloodRequest> {
    vec![
        BloodRequest {
            blood_type: "O-".to_string(),
            units_needed: 2,
            urgency: "critical".to_string(),
            required_by: as_of + Duration::hours(1),
            patient_name: "Rahul Sharma".to_string(),
            contact_number: "+91 98765 43210".to_string(),
            hospital: "City Hospital".to_string(),
            address: "Ward 4, City Hospital, Pune".to_string(),
            additional_info: None,
        },
        BloodRequest {
            blood_type: "AB+".to_string(),
            units_needed: 1,
            urgency: "urgent".to_string(),
            required_by: as_of + Duration::hours(20),
            patient_name: "Priya Menon".to_string(),
            contact_number: "+91 91234 56780".to_string(),
            hospital: "General Hospital".to_string(),
            address: "Block B, General Hospital, Kochi".to_string(),
            additional_info: Some("Scheduled transfusion".to_string()),
        },
    ]
}

fn sample_patient(today: NaiveDate) -> PatientSnapshot {
    PatientSnapshot {
        name: "Rahul Sharma".to_string(),
        blood_type: "B+".to_string(),
        hemoglobin_g_dl: 8.2,
        transfusions: TransfusionSchedule {
            last: today - Duration::days(11),
            next: today + Duration::days(3),
        },
        medications: vec![
            MedicationDose {
                name: "Deferasirox".to_string(),
                time: "9:00 AM".to_string(),
                taken: true,
            },
            MedicationDose {
                name: "Folic Acid".to_string(),
                time: "2:00 PM".to_string(),
                taken: false,
            },
        ],
        appointments: vec![Appointment {
            doctor: "Dr. Priya Singh".to_string(),
            date: today + Duration::days(3),
            kind: "Transfusion".to_string(),
        }],
    }
}

fn render_donor_verdict(
    profile: &DonorProfile,
    verdict: &EligibilityVerdict,
    as_of: DateTime<Utc>,
) {
    println!(
        "\nDonor {} ({}), evaluated {}",
        profile.full_name,
        profile.blood_type,
        as_of.to_rfc3339()
    );
    if verdict.eligible {
        println!("Eligible to donate");
        return;
    }

    println!("Not eligible");
    for reason in &verdict.reasons {
        println!("- [{}] {}", reason.code(), reason.summary());
    }
}

fn render_request_classification(
    request: &BloodRequest,
    classification: &RequestClassification,
    as_of: DateTime<Utc>,
) {
    println!(
        "\nRequest for {} unit(s) of {} for {} at {}",
        request.units_needed, request.blood_type, request.patient_name, request.hospital
    );
    println!("Status: {}", classification.summary());
    match classification.urgency_deadline {
        Some(deadline) => {
            let stated = request.required_by - as_of;
            println!(
                "Tier deadline {} (stated need in {}h {}m)",
                deadline.to_rfc3339(),
                stated.num_hours(),
                stated.num_minutes() % 60
            );
        }
        None => println!("Tier deadline: unavailable for urgency '{}'", request.urgency),
    }
}

fn render_care_summary(summary: &CareSummary) {
    println!("\nCare summary for {}", summary.patient_name);
    println!(
        "Hemoglobin {:.1} g/dL: {} ({:.0}% of gauge)",
        summary.hemoglobin_g_dl,
        summary.hemoglobin_status.label(),
        summary.hemoglobin_gauge_percent
    );
    if summary.transfusion_overdue {
        println!(
            "Transfusion overdue by {} day(s)",
            -summary.days_until_next_transfusion
        );
    } else {
        println!(
            "Next transfusion in {} day(s)",
            summary.days_until_next_transfusion
        );
    }
    println!(
        "Medications taken today: {}/{}",
        summary.medication_adherence.taken, summary.medication_adherence.scheduled
    );
    for pending in &summary.medication_adherence.pending {
        println!("- pending: {pending}");
    }
}
