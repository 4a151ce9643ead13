//! CSV 내보내기
//!
//! 컬럼 순서는 [`Alert::COLUMNS`]와 같습니다.
//! 시각은 `%Y-%m-%d %H:%M:%S`, 알 수 없는 시각은 빈 필드,
//! 블랙리스트 플래그는 `True`/`False`로 기록합니다.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use logwarden_core::types::Alert;

use crate::error::AnalyzerError;

/// CSV 시각 형식
pub const CSV_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 파일명 형식
const FILE_NAME_FORMAT: &str = "alerts_%Y%m%d_%H%M%S.csv";

/// 알림을 CSV로 기록합니다 (헤더 포함).
pub fn write_csv<W: Write>(alerts: &[Alert], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(Alert::COLUMNS)?;

    for alert in alerts {
        let time = alert
            .time
            .map(|t| t.format(CSV_TIME_FORMAT).to_string())
            .unwrap_or_default();
        let blacklisted = if alert.blacklisted { "True" } else { "False" };
        writer.write_record([
            time.as_str(),
            alert.ip.as_str(),
            alert.category.label(),
            alert.details.as_str(),
            blacklisted,
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// `reports_dir` 아래 `alerts_<YYYYmmdd_HHMMSS>.csv` 파일로 내보냅니다.
///
/// 디렉토리가 없으면 생성합니다. 생성된 파일 경로를 반환합니다.
pub async fn export_csv(
    alerts: &[Alert],
    reports_dir: impl AsRef<Path>,
) -> Result<PathBuf, AnalyzerError> {
    export_csv_at(alerts, reports_dir, Local::now().naive_local()).await
}

/// 파일명에 쓸 시각을 지정해 내보냅니다.
pub async fn export_csv_at(
    alerts: &[Alert],
    reports_dir: impl AsRef<Path>,
    now: NaiveDateTime,
) -> Result<PathBuf, AnalyzerError> {
    let dir = reports_dir.as_ref();
    let path = dir.join(now.format(FILE_NAME_FORMAT).to_string());

    let export_err = |reason: String| AnalyzerError::Export {
        path: path.display().to_string(),
        reason,
    };

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| export_err(e.to_string()))?;

    let mut buf = Vec::new();
    write_csv(alerts, &mut buf).map_err(|e| export_err(e.to_string()))?;

    tokio::fs::write(&path, buf)
        .await
        .map_err(|e| export_err(e.to_string()))?;

    info!(path = %path.display(), alerts = alerts.len(), "alerts exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use logwarden_core::types::AlertCategory;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn sample() -> Vec<Alert> {
        vec![
            Alert::new(
                Some(at(6, 30, 0)),
                "203.0.113.9",
                AlertCategory::SshBruteForce,
                "6 failed logins within 5 min",
            )
            .with_blacklisted(true),
            Alert::new(
                None,
                "198.51.100.7",
                AlertCategory::WebScanning,
                "25 unique URLs accessed",
            ),
        ]
    }

    #[test]
    fn header_follows_column_order() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "time,ip,category,details,blacklisted\n"
        );
    }

    #[test]
    fn rows_format_time_and_flags() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "2024-01-10 06:30:00,203.0.113.9,SSH Brute Force,6 failed logins within 5 min,True"
        );
        assert_eq!(
            lines[2],
            ",198.51.100.7,Web Scanning,25 unique URLs accessed,False"
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let alert = Alert::new(None, "a,b", AlertCategory::PossibleDos, "x");
        let mut buf = Vec::new();
        write_csv(&[alert], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"a,b\""));
    }

    #[tokio::test]
    async fn export_creates_directory_and_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports").join("nested");
        let path = export_csv_at(&sample(), &reports, at(14, 5, 9)).await.unwrap();

        assert_eq!(path, reports.join("alerts_20240110_140509.csv"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("time,ip,category,details,blacklisted\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn export_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = export_csv(&sample(), &blocker).await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Export { .. }));
    }
}
