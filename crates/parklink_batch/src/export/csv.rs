use parklink_core::EntityLink;

use crate::error::BatchError;
use crate::runner::NearbyBatchResult;

pub(crate) fn links_to_csv_impl(
    links: &[EntityLink],
    file: std::fs::File,
) -> Result<(), BatchError> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "source_a_id",
        "source_b_id",
        "score",
        "method",
        "name_similarity",
        "location_similarity",
    ])?;

    for link in links {
        wtr.write_record([
            link.source_a_id.as_str(),
            link.source_b_id.as_str(),
            &link.score.to_string(),
            link.method.as_str(),
            &link.breakdown.name.to_string(),
            &link.breakdown.location.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn nearby_to_csv_impl(
    results: &[NearbyBatchResult],
    file: std::fs::File,
) -> Result<(), BatchError> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "reference_id",
        "reference_name",
        "rank",
        "candidate_id",
        "candidate_name",
        "distance_m",
        "radius_m",
    ])?;

    for batch in results {
        for (rank, result) in batch.results.iter().enumerate() {
            wtr.write_record([
                batch.reference_id.as_str(),
                batch.reference_name.as_str(),
                &(rank + 1).to_string(),
                result.entity.id.as_str(),
                result.entity.name.as_str(),
                &format!("{:.1}", result.distance_m),
                &result.radius_m.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
