// src/services/reports.rs

use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::{
    common::csv::to_csv,
    common::error::AppError,
    db::{AccountRepository, AttendanceRepository, SlotRepository},
    models::{
        account::Account,
        report::{
            DateRange, OverviewReport, OverviewSummary, PreviewRow, ReportUser, SessionRow,
            TutorStats, VisitRow,
        },
    },
};

const CENTER_PREVIEW_LIMIT: usize = 10;

// Intervalo de filtragem dos relatórios. Lado ausente = sem limite.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateBounds {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// start vira 00:00:00Z e end vira 23:59:59.999Z do dia pedido.
// Datas mal formadas são ignoradas, como o original fazia.
pub fn parse_date_range(start: Option<&str>, end: Option<&str>) -> DateBounds {
    let start = start
        .and_then(|s| s.parse::<NaiveDate>().ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let end = end
        .and_then(|s| s.parse::<NaiveDate>().ok())
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        .map(|dt| dt.and_utc());
    DateBounds { start, end }
}

fn within(t: DateTime<Utc>, bounds: &DateBounds) -> bool {
    if let Some(start) = bounds.start {
        if t < start {
            return false;
        }
    }
    if let Some(end) = bounds.end {
        if t > end {
            return false;
        }
    }
    true
}

fn session_start(row: &SessionRow) -> DateTime<Utc> {
    row.date.and_time(row.start_time).and_utc()
}

// Fim da sessão, só quando é posterior ao início. Linha com horário
// invertido é pulada nas agregações, nunca derruba o relatório.
fn session_end(row: &SessionRow) -> Option<DateTime<Utc>> {
    let end = row.date.and_time(row.end_time).and_utc();
    (end > session_start(row)).then_some(end)
}

fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

fn weekday_key(t: DateTime<Utc>) -> String {
    t.format("%A").to_string()
}

fn hour_key(t: DateTime<Utc>) -> String {
    format!("{:02}:00", t.hour())
}

fn iso(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// Arredonda para uma casa, como o toFixed(1) do painel
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// Contagem em ordem de primeira aparição; o desempate do "mais cheio"
// fica com a chave vista primeiro.
fn bump(counts: &mut Vec<(String, i64)>, key: String) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key, 1)),
    }
}

fn find_max_key(counts: &[(String, i64)]) -> Option<String> {
    let mut best: Option<(&str, i64)> = None;
    for (key, count) in counts {
        if best.is_none() || *count > best.unwrap().1 {
            best = Some((key, *count));
        }
    }
    best.map(|(k, _)| k.to_string())
}

struct TutorAgg {
    tutor_id: Uuid,
    tutor_name: String,
    tutor_email: String,
    total_sessions: i64,
    total_minutes: f64,
    students: HashSet<Uuid>,
}

// GET /api/reports/overview: todo o cálculo é puro sobre as linhas já
// carregadas do banco.
pub fn build_overview(
    caller: &Account,
    total_students: i64,
    visits: &[VisitRow],
    sessions: &[SessionRow],
    bounds: &DateBounds,
    generated_at: DateTime<Utc>,
) -> OverviewReport {
    // Presença do centro (visitas por aluno)
    let mut total_visits = 0i64;
    let mut total_minutes = 0f64;
    let mut earliest_check_in: Option<DateTime<Utc>> = None;
    let mut latest_check_out: Option<DateTime<Utc>> = None;

    for visit in visits {
        if !within(visit.check_in, bounds) {
            continue;
        }
        total_visits += 1;

        if let Some(check_out) = visit.check_out {
            if check_out > visit.check_in {
                total_minutes += duration_minutes(visit.check_in, check_out);
            }
            if latest_check_out.is_none_or(|latest| check_out > latest) {
                latest_check_out = Some(check_out);
            }
        }
        if earliest_check_in.is_none_or(|earliest| visit.check_in < earliest) {
            earliest_check_in = Some(visit.check_in);
        }
    }

    let avg_visit_minutes = if total_visits > 0 {
        round1(total_minutes / total_visits as f64)
    } else {
        0.0
    };

    // Estatísticas por tutor + dia/hora mais cheios, a partir dos slots
    let mut tutor_aggs: Vec<TutorAgg> = Vec::new();
    let mut tutor_index: HashMap<Uuid, usize> = HashMap::new();
    let mut day_counts: Vec<(String, i64)> = Vec::new();
    let mut hour_counts: Vec<(String, i64)> = Vec::new();
    let mut unique_tutors: HashSet<Uuid> = HashSet::new();
    let mut unique_students: HashSet<Uuid> = HashSet::new();

    for session in sessions {
        let start = session_start(session);
        if !within(start, bounds) {
            continue;
        }

        if let Some(tutor_id) = session.tutor_id {
            unique_tutors.insert(tutor_id);
        }
        if let Some(student_id) = session.student_id {
            unique_students.insert(student_id);
        }

        let duration = session_end(session)
            .map(|end| duration_minutes(start, end))
            .unwrap_or(0.0);

        if let Some(tutor_id) = session.tutor_id {
            let idx = *tutor_index.entry(tutor_id).or_insert_with(|| {
                tutor_aggs.push(TutorAgg {
                    tutor_id,
                    tutor_name: session
                        .tutor_name
                        .clone()
                        .unwrap_or_else(|| "Unknown Tutor".to_string()),
                    tutor_email: session.tutor_email.clone().unwrap_or_default(),
                    total_sessions: 0,
                    total_minutes: 0.0,
                    students: HashSet::new(),
                });
                tutor_aggs.len() - 1
            });

            let agg = &mut tutor_aggs[idx];
            agg.total_sessions += 1;
            agg.total_minutes += duration;
            if let Some(student_id) = session.student_id {
                agg.students.insert(student_id);
            }
        }

        bump(&mut day_counts, weekday_key(start));
        bump(&mut hour_counts, hour_key(start));
    }

    // Prévia: as 10 sessões mais recentes
    let mut sorted: Vec<&SessionRow> = sessions.iter().collect();
    sorted.sort_by_key(|s| std::cmp::Reverse(session_start(s)));

    let center_preview: Vec<PreviewRow> = sorted
        .iter()
        .take(CENTER_PREVIEW_LIMIT)
        .enumerate()
        .map(|(index, session)| {
            let check_in = session_start(session);
            let check_out = session_end(session);
            PreviewRow {
                row_number: index + 1,
                tutor_name: session.tutor_name.clone().unwrap_or_default(),
                tutor_email: session.tutor_email.clone().unwrap_or_default(),
                student_name: session.student_name.clone().unwrap_or_default(),
                student_email: session.student_email.clone().unwrap_or_default(),
                check_in,
                check_out,
                duration_min: check_out.map(|end| duration_minutes(check_in, end).round() as i64),
            }
        })
        .collect();

    let tutor_stats: Vec<TutorStats> = tutor_aggs
        .into_iter()
        .map(|agg| TutorStats {
            tutor_id: agg.tutor_id,
            tutor_name: agg.tutor_name,
            tutor_email: agg.tutor_email,
            total_sessions: agg.total_sessions,
            total_students: agg.students.len(),
            total_minutes: agg.total_minutes.round() as i64,
            avg_session_minutes: if agg.total_sessions > 0 {
                round1(agg.total_minutes / agg.total_sessions as f64)
            } else {
                0.0
            },
        })
        .collect();

    OverviewReport {
        message: "Reports overview loaded successfully".to_string(),
        generated_at,
        user: ReportUser {
            email: caller.email.clone(),
            role: caller.role,
        },
        summary: OverviewSummary {
            total_students,
            total_visits,
            total_minutes: total_minutes.round() as i64,
            avg_visit_minutes,
            date_range: DateRange {
                start: earliest_check_in,
                end: latest_check_out,
            },
            total_unique_tutors: unique_tutors.len(),
            total_unique_students: unique_students.len(),
            busiest_day: find_max_key(&day_counts),
            busiest_hour: find_max_key(&hour_counts),
        },
        tutor_stats,
        center_preview,
    }
}

// GET /api/reports/center-csv: bloco de metadados + uma linha por sessão
pub fn build_center_csv(
    sessions: &[SessionRow],
    bounds: &DateBounds,
    generated_at: DateTime<Utc>,
) -> Vec<Vec<String>> {
    let mut sorted: Vec<&SessionRow> = sessions.iter().collect();
    sorted.sort_by_key(|s| session_start(s));

    let mut day_counts: Vec<(String, i64)> = Vec::new();
    let mut hour_counts: Vec<(String, i64)> = Vec::new();
    let mut unique_tutors: HashSet<Uuid> = HashSet::new();
    let mut unique_students: HashSet<Uuid> = HashSet::new();
    let mut visit_counters: HashMap<Uuid, i64> = HashMap::new();
    let mut total_minutes = 0f64;
    let mut rows: Vec<Vec<String>> = Vec::new();

    for session in sorted {
        let check_in = session_start(session);
        if !within(check_in, bounds) {
            continue;
        }

        if let Some(tutor_id) = session.tutor_id {
            unique_tutors.insert(tutor_id);
        }
        if let Some(student_id) = session.student_id {
            unique_students.insert(student_id);
        }

        let check_out = session_end(session);
        let duration = check_out.map(|end| duration_minutes(check_in, end));
        if let Some(d) = duration {
            total_minutes += d;
        }

        bump(&mut day_counts, weekday_key(check_in));
        bump(&mut hour_counts, hour_key(check_in));

        let visit_number = match session.student_id {
            Some(student_id) => {
                let counter = visit_counters.entry(student_id).or_insert(0);
                *counter += 1;
                counter.to_string()
            }
            None => String::new(),
        };

        let status = if check_out.is_some() {
            "Completed"
        } else {
            "In Progress"
        };

        rows.push(vec![
            session.tutor_name.clone().unwrap_or_default(),
            session.tutor_email.clone().unwrap_or_default(),
            session.student_name.clone().unwrap_or_default(),
            session.student_email.clone().unwrap_or_default(),
            visit_number,
            iso(check_in),
            check_out.map(iso).unwrap_or_default(),
            duration
                .map(|d| (d.round() as i64).to_string())
                .unwrap_or_default(),
            status.to_string(),
        ]);
    }

    let total_visits = rows.len() as i64;
    let avg_visit_minutes = if total_visits > 0 {
        round1(total_minutes / total_visits as f64)
    } else {
        0.0
    };
    let total_hours = (total_minutes / 60.0 * 100.0).round() / 100.0;

    let mut out: Vec<Vec<String>> = vec![
        vec!["BugHouse Center Report".into()],
        vec!["Generated At".into(), iso(generated_at)],
        vec![
            "Filtered Start".into(),
            bounds.start.map(iso).unwrap_or_default(),
        ],
        vec![
            "Filtered End".into(),
            bounds.end.map(iso).unwrap_or_default(),
        ],
        Vec::new(),
        vec!["Total Visits".into(), total_visits.to_string()],
        vec![
            "Total Unique Tutors".into(),
            unique_tutors.len().to_string(),
        ],
        vec![
            "Total Unique Students".into(),
            unique_students.len().to_string(),
        ],
        vec!["Total Hours Tutored".into(), total_hours.to_string()],
        vec![
            "Average Visit Duration (mins)".into(),
            avg_visit_minutes.to_string(),
        ],
        vec![
            "Busiest Day".into(),
            find_max_key(&day_counts).unwrap_or_default(),
        ],
        vec![
            "Busiest Hour".into(),
            find_max_key(&hour_counts).unwrap_or_default(),
        ],
        Vec::new(),
        vec![
            "Tutor Name".into(),
            "Tutor Email".into(),
            "Student Name".into(),
            "Student Email".into(),
            "Visit #".into(),
            "Check-In Time".into(),
            "Check-Out Time".into(),
            "Duration (mins)".into(),
            "Status".into(),
        ],
    ];
    out.extend(rows);
    out
}

// GET /api/reports/tutor-csv/{tutorId}
pub fn build_tutor_csv(
    tutor_name: &str,
    tutor_email: &str,
    sessions: &[SessionRow],
    bounds: &DateBounds,
) -> Vec<Vec<String>> {
    // Tutor sem sessão nenhuma: relatório curto
    if sessions.is_empty() {
        return vec![
            vec!["Tutor Report".into()],
            vec!["Tutor Name".into(), tutor_name.to_string()],
            vec!["Tutor Email".into(), tutor_email.to_string()],
            Vec::new(),
            vec!["Total Visits".into(), "0".into()],
        ];
    }

    let mut sorted: Vec<&SessionRow> = sessions.iter().collect();
    sorted.sort_by_key(|s| session_start(s));

    let mut total_minutes = 0f64;
    let mut earliest_check_in: Option<DateTime<Utc>> = None;
    let mut latest_check_out: Option<DateTime<Utc>> = None;
    let mut day_counts: Vec<(String, i64)> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut last_start: Option<DateTime<Utc>> = None;

    for session in &sorted {
        let check_in = session_start(session);
        if !within(check_in, bounds) {
            continue;
        }

        let check_out = session_end(session);
        let duration = check_out.map(|end| duration_minutes(check_in, end));
        if let Some(d) = duration {
            total_minutes += d;
        }

        if earliest_check_in.is_none_or(|earliest| check_in < earliest) {
            earliest_check_in = Some(check_in);
        }
        if let Some(end) = check_out {
            if latest_check_out.is_none_or(|latest| end > latest) {
                latest_check_out = Some(end);
            }
        }
        last_start = Some(check_in);

        bump(&mut day_counts, weekday_key(check_in));

        rows.push(vec![
            (rows.len() + 1).to_string(),
            iso(check_in),
            check_out.map(iso).unwrap_or_default(),
            duration
                .map(|d| (d.round() as i64).to_string())
                .unwrap_or_default(),
            weekday_key(check_in),
            session.student_name.clone().unwrap_or_default(),
            session.student_email.clone().unwrap_or_default(),
            session.subjects.join("; "),
        ]);
    }

    let total_visits = rows.len() as i64;
    let avg_visit_minutes = if total_visits > 0 {
        round1(total_minutes / total_visits as f64)
    } else {
        0.0
    };
    let total_hours = (total_minutes / 60.0 * 100.0).round() / 100.0;

    let date_range_text = match (earliest_check_in, latest_check_out) {
        (Some(a), Some(b)) => format!("{} → {}", iso(a), iso(b)),
        _ => String::new(),
    };
    let last_visit = latest_check_out.or(last_start);

    let mut out: Vec<Vec<String>> = vec![
        vec!["Tutor Report".into()],
        vec!["Tutor Name".into(), tutor_name.to_string()],
        vec!["Tutor Email".into(), tutor_email.to_string()],
        Vec::new(),
        vec![
            "Filtered Start".into(),
            bounds.start.map(iso).unwrap_or_default(),
        ],
        vec![
            "Filtered End".into(),
            bounds.end.map(iso).unwrap_or_default(),
        ],
        vec!["Date Range (actual data)".into(), date_range_text],
        vec!["Total Visits".into(), total_visits.to_string()],
        vec!["Total Hours Tutored".into(), total_hours.to_string()],
        vec![
            "Average Visit Duration (mins)".into(),
            avg_visit_minutes.to_string(),
        ],
        vec![
            "Busiest Day".into(),
            find_max_key(&day_counts).unwrap_or_default(),
        ],
        vec![
            "Last Visit".into(),
            last_visit.map(iso).unwrap_or_default(),
        ],
        Vec::new(),
        vec![
            "Visit #".into(),
            "Check-In Time".into(),
            "Check-Out Time".into(),
            "Duration (mins)".into(),
            "Day of Week".into(),
            "Student Name".into(),
            "Student Email".into(),
            "Subjects".into(),
        ],
    ];
    out.extend(rows);
    out
}

#[derive(Clone)]
pub struct ReportService {
    slot_repo: SlotRepository,
    attendance_repo: AttendanceRepository,
    account_repo: AccountRepository,
}

impl ReportService {
    pub fn new(
        slot_repo: SlotRepository,
        attendance_repo: AttendanceRepository,
        account_repo: AccountRepository,
    ) -> Self {
        Self {
            slot_repo,
            attendance_repo,
            account_repo,
        }
    }

    pub async fn overview(
        &self,
        caller: &Account,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<OverviewReport, AppError> {
        let bounds = parse_date_range(start, end);

        let total_students = self.attendance_repo.count_records().await?;
        let visits = self.attendance_repo.all_visits().await?;
        let sessions = self.slot_repo.session_rows(None).await?;

        Ok(build_overview(
            caller,
            total_students,
            &visits,
            &sessions,
            &bounds,
            Utc::now(),
        ))
    }

    pub async fn center_csv(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<String, AppError> {
        let bounds = parse_date_range(start, end);
        let sessions = self.slot_repo.session_rows(None).await?;

        let rows = build_center_csv(&sessions, &bounds, Utc::now());
        Ok(to_csv(rows)?)
    }

    pub async fn tutor_csv(
        &self,
        tutor_id: Uuid,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<String, AppError> {
        let bounds = parse_date_range(start, end);

        let (tutor_name, tutor_email) = match self.account_repo.find_by_id(tutor_id).await? {
            Some(tutor) => (tutor.name, tutor.email),
            None => ("Unknown Tutor".to_string(), String::new()),
        };

        let sessions = self.slot_repo.session_rows(Some(tutor_id)).await?;

        let rows = build_tutor_csv(&tutor_name, &tutor_email, &sessions, &bounds);
        Ok(to_csv(rows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Role;
    use chrono::{NaiveTime, TimeZone};

    fn caller() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "admin@uta.edu".into(),
            id_number: "1001".into(),
            name: "Admin".into(),
            role: Role::Admin,
            grade_level: "Staff".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn session(
        tutor: (&str, Uuid),
        student: (&str, Uuid),
        day: u32,
        start: NaiveTime,
        end: NaiveTime,
    ) -> SessionRow {
        SessionRow {
            tutor_id: Some(tutor.1),
            tutor_name: Some(tutor.0.to_string()),
            tutor_email: Some(format!("{}@uta.edu", tutor.0)),
            student_id: Some(student.1),
            student_name: Some(student.0.to_string()),
            student_email: Some(format!("{}@mavs.uta.edu", student.0)),
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            start_time: start,
            end_time: end,
            subjects: vec!["Math".into()],
        }
    }

    fn visit(day: u32, start: (u32, u32), minutes: Option<i64>) -> VisitRow {
        let check_in = Utc
            .with_ymd_and_hms(2025, 6, day, start.0, start.1, 0)
            .unwrap();
        VisitRow {
            check_in,
            check_out: minutes.map(|m| check_in + chrono::Duration::minutes(m)),
        }
    }

    #[test]
    fn parse_range_expands_to_day_bounds() {
        let bounds = parse_date_range(Some("2025-06-01"), Some("2025-06-02"));
        assert_eq!(
            bounds.start.unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            iso(bounds.end.unwrap()),
            "2025-06-02T23:59:59.999Z"
        );

        // Mal formado é ignorado
        let bounds = parse_date_range(Some("junho"), None);
        assert!(bounds.start.is_none());
        assert!(bounds.end.is_none());
    }

    #[test]
    fn overview_totals_and_average() {
        let visits = vec![
            visit(2, (10, 0), Some(60)),
            visit(2, (12, 0), Some(30)),
            visit(3, (9, 0), None), // aberta: conta como visita, sem minutos
        ];

        let report = build_overview(
            &caller(),
            2,
            &visits,
            &[],
            &DateBounds::default(),
            Utc::now(),
        );

        assert_eq!(report.summary.total_students, 2);
        assert_eq!(report.summary.total_visits, 3);
        assert_eq!(report.summary.total_minutes, 90);
        assert_eq!(report.summary.avg_visit_minutes, 30.0);
        assert_eq!(
            report.summary.date_range.start.unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
        );
        assert_eq!(
            report.summary.date_range.end.unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 2, 12, 30, 0).unwrap()
        );
    }

    #[test]
    fn overview_respects_date_bounds() {
        let visits = vec![visit(1, (10, 0), Some(60)), visit(5, (10, 0), Some(60))];
        let bounds = parse_date_range(Some("2025-06-04"), None);

        let report = build_overview(&caller(), 1, &visits, &[], &bounds, Utc::now());
        assert_eq!(report.summary.total_visits, 1);
        assert_eq!(report.summary.total_minutes, 60);
    }

    #[test]
    fn busiest_day_tie_breaks_on_first_seen() {
        let tutor = ("ana", Uuid::new_v4());
        let s1 = ("bia", Uuid::new_v4());
        // 2025-06-02 segunda, 2025-06-03 terça: uma sessão cada
        let sessions = vec![
            session(tutor, s1, 2, t(10, 0), t(10, 30)),
            session(tutor, s1, 3, t(11, 0), t(11, 30)),
        ];

        let report = build_overview(
            &caller(),
            0,
            &[],
            &sessions,
            &DateBounds::default(),
            Utc::now(),
        );
        assert_eq!(report.summary.busiest_day.as_deref(), Some("Monday"));
        assert_eq!(report.summary.busiest_hour.as_deref(), Some("10:00"));
    }

    #[test]
    fn tutor_stats_aggregate_sessions() {
        let tutor = ("ana", Uuid::new_v4());
        let s1 = ("bia", Uuid::new_v4());
        let s2 = ("caio", Uuid::new_v4());
        let sessions = vec![
            session(tutor, s1, 2, t(10, 0), t(10, 30)),
            session(tutor, s2, 2, t(11, 0), t(12, 0)),
            session(tutor, s1, 3, t(10, 0), t(10, 30)),
        ];

        let report = build_overview(
            &caller(),
            0,
            &[],
            &sessions,
            &DateBounds::default(),
            Utc::now(),
        );

        assert_eq!(report.tutor_stats.len(), 1);
        let stats = &report.tutor_stats[0];
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.total_minutes, 120);
        assert_eq!(stats.avg_session_minutes, 40.0);
        assert_eq!(report.summary.total_unique_tutors, 1);
        assert_eq!(report.summary.total_unique_students, 2);
    }

    #[test]
    fn center_preview_is_newest_first_capped_at_ten() {
        let tutor = ("ana", Uuid::new_v4());
        let student = ("bia", Uuid::new_v4());
        let sessions: Vec<SessionRow> = (1..=12)
            .map(|day| session(tutor, student, day, t(10, 0), t(10, 30)))
            .collect();

        let report = build_overview(
            &caller(),
            0,
            &[],
            &sessions,
            &DateBounds::default(),
            Utc::now(),
        );

        assert_eq!(report.center_preview.len(), 10);
        assert_eq!(report.center_preview[0].row_number, 1);
        // Mais recente primeiro: dia 12
        assert_eq!(
            report.center_preview[0].check_in,
            Utc.with_ymd_and_hms(2025, 6, 12, 10, 0, 0).unwrap()
        );
        assert_eq!(report.center_preview[0].duration_min, Some(30));
    }

    #[test]
    fn center_csv_single_booked_slot() {
        // Propriedade do contrato: um único slot de 30 minutos gera uma
        // linha com duração "30" e status "Completed".
        let tutor = ("T", Uuid::new_v4());
        let student = ("S", Uuid::new_v4());
        let sessions = vec![session(tutor, student, 2, t(14, 0), t(14, 30))];

        let rows = build_center_csv(
            &sessions,
            &DateBounds::default(),
            Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap(),
        );

        assert_eq!(rows[0], vec!["BugHouse Center Report".to_string()]);
        let data = rows.last().unwrap();
        assert_eq!(data[0], "T");
        assert_eq!(data[4], "1"); // Visit #
        assert_eq!(data[7], "30"); // Duration (mins)
        assert_eq!(data[8], "Completed");
    }

    #[test]
    fn center_csv_numbers_visits_per_student() {
        let tutor = ("ana", Uuid::new_v4());
        let s1 = ("bia", Uuid::new_v4());
        let s2 = ("caio", Uuid::new_v4());
        let sessions = vec![
            session(tutor, s1, 2, t(10, 0), t(10, 30)),
            session(tutor, s2, 2, t(11, 0), t(11, 30)),
            session(tutor, s1, 3, t(10, 0), t(10, 30)),
        ];

        let rows = build_center_csv(&sessions, &DateBounds::default(), Utc::now());
        let data: Vec<&Vec<String>> = rows.iter().skip(14).collect();
        assert_eq!(data[0][4], "1"); // primeira visita da bia
        assert_eq!(data[1][4], "1"); // primeira do caio
        assert_eq!(data[2][4], "2"); // segunda da bia
    }

    #[test]
    fn inverted_session_is_in_progress_without_duration() {
        let tutor = ("ana", Uuid::new_v4());
        let student = ("bia", Uuid::new_v4());
        // Horário invertido: sem fim válido
        let sessions = vec![session(tutor, student, 2, t(14, 0), t(13, 0))];

        let rows = build_center_csv(&sessions, &DateBounds::default(), Utc::now());
        let data = rows.last().unwrap();
        assert_eq!(data[6], ""); // Check-Out vazio
        assert_eq!(data[7], ""); // Duração vazia
        assert_eq!(data[8], "In Progress");
    }

    #[test]
    fn tutor_csv_empty_variant() {
        let rows = build_tutor_csv("Ana", "ana@uta.edu", &[], &DateBounds::default());
        assert_eq!(rows[0], vec!["Tutor Report".to_string()]);
        assert_eq!(
            rows.last().unwrap(),
            &vec!["Total Visits".to_string(), "0".to_string()]
        );
    }

    #[test]
    fn tutor_csv_summary_and_rows() {
        let tutor = ("ana", Uuid::new_v4());
        let student = ("bia", Uuid::new_v4());
        let sessions = vec![
            session(tutor, student, 2, t(10, 0), t(10, 30)),
            session(tutor, student, 3, t(11, 0), t(12, 0)),
        ];

        let rows = build_tutor_csv("Ana", "ana@uta.edu", &sessions, &DateBounds::default());

        // Bloco de resumo
        assert_eq!(rows[7], vec!["Total Visits".to_string(), "2".to_string()]);
        assert_eq!(
            rows[8],
            vec!["Total Hours Tutored".to_string(), "1.5".to_string()]
        );

        // Linhas de visita, em ordem cronológica e numeradas
        let first = &rows[14];
        assert_eq!(first[0], "1");
        assert_eq!(first[3], "30");
        assert_eq!(first[4], "Monday");
        assert_eq!(first[7], "Math");
        let second = &rows[15];
        assert_eq!(second[0], "2");
        assert_eq!(second[3], "60");
    }
}
