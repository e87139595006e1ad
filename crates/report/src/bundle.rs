use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

use crate::render::RenderedReport;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Download name for the weekly bundle, e.g. `vendor-review-2025-06-02.tar.gz`.
pub fn bundle_name(date: NaiveDate) -> String {
    format!("vendor-review-{}.tar.gz", date.format("%Y-%m-%d"))
}

/// Packs the three rendered report files into a gzip'd tar archive.
pub fn bundle(rendered: &RenderedReport) -> Result<Vec<u8>, BundleError> {
    let gz = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(gz);

    for (name, data) in rendered.files() {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, data)?;
    }

    let gz = builder.into_inner()?;
    Ok(gz.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn sample_rendered() -> RenderedReport {
        RenderedReport {
            approved: b"approved".to_vec(),
            problem: b"problem".to_vec(),
            vendor_summary: b"summary".to_vec(),
        }
    }

    #[test]
    fn bundle_name_is_dated() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(bundle_name(date), "vendor-review-2025-06-02.tar.gz");
    }

    #[test]
    fn archive_round_trips_all_three_files() {
        let bytes = bundle(&sample_rendered()).unwrap();

        let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
        let mut seen = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let name = entry.path().unwrap().to_string_lossy().into_owned();
            let mut contents = String::new();
            entry.read_to_string(&mut contents).unwrap();
            seen.push((name, contents));
        }

        assert_eq!(
            seen,
            vec![
                ("approved-vendors-customers.csv".to_string(), "approved".to_string()),
                ("problem-vendors-customers.csv".to_string(), "problem".to_string()),
                ("vendor-summary.csv".to_string(), "summary".to_string()),
            ]
        );
    }
}
