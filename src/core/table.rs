use crate::core::{SampleRecord, SampleTable, Segment, SegmentSamples};
use crate::utils::error::{ChartError, Result};

impl SampleTable {
    /// Flattens per-segment samples, keeping segment order then sample order.
    pub fn from_samples(samples: &[SegmentSamples]) -> Self {
        let records = samples
            .iter()
            .flat_map(|group| {
                group.values.iter().map(move |&value| SampleRecord {
                    segment: group.segment,
                    value,
                })
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn values_for(&self, segment: Segment) -> Vec<f64> {
        self.records
            .iter()
            .filter(|record| record.segment == segment)
            .map(|record| record.value)
            .collect()
    }

    pub fn count_for(&self, segment: Segment) -> usize {
        self.records
            .iter()
            .filter(|record| record.segment == segment)
            .count()
    }

    /// CSV with a `segment,purchase_amount` header.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer
            .into_inner()
            .map_err(|e| ChartError::IoError(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<SegmentSamples> {
        vec![
            SegmentSamples {
                segment: Segment::HighValue,
                values: vec![500.0, 410.5],
            },
            SegmentSamples {
                segment: Segment::LowValue,
                values: vec![80.0, 75.25, 90.0],
            },
        ]
    }

    #[test]
    fn test_record_count_is_sum_of_segments() {
        let table = SampleTable::from_samples(&samples());
        assert_eq!(table.len(), 5);
        assert_eq!(table.count_for(Segment::HighValue), 2);
        assert_eq!(table.count_for(Segment::LowValue), 3);
        assert_eq!(table.count_for(Segment::MediumValue), 0);
    }

    #[test]
    fn test_insertion_order() {
        let table = SampleTable::from_samples(&samples());
        let order: Vec<(Segment, f64)> = table
            .records()
            .iter()
            .map(|r| (r.segment, r.value))
            .collect();
        assert_eq!(
            order,
            vec![
                (Segment::HighValue, 500.0),
                (Segment::HighValue, 410.5),
                (Segment::LowValue, 80.0),
                (Segment::LowValue, 75.25),
                (Segment::LowValue, 90.0),
            ]
        );
        assert_eq!(table.values_for(Segment::LowValue), vec![80.0, 75.25, 90.0]);
    }

    #[test]
    fn test_csv_output() {
        let table = SampleTable::from_samples(&samples());
        let csv = String::from_utf8(table.to_csv_bytes().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "segment,purchase_amount");
        assert_eq!(lines[1], "High-Value,500.0");
        assert_eq!(lines[4], "Low-Value,75.25");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_empty_table() {
        let table = SampleTable::from_samples(&[]);
        assert!(table.is_empty());
        assert!(table.values_for(Segment::LowValue).is_empty());
    }
}
