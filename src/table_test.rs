// Unit tests for column ordering and TSV rendering

use super::*;
use pretty_assertions::assert_eq;

fn record(url: &str, specs: &[(&str, &str)]) -> Record {
    let mut record = Record::bare(url);
    for (k, v) in specs {
        record.specs.insert(k.to_string(), v.to_string());
    }
    record
}

#[test]
fn test_heterogeneous_records_union_columns() {
    let records = vec![
        record("a", &[("Weight", "1kg")]),
        record("b", &[("Dimensions", "10x5")]),
    ];
    let table = assemble(&records).unwrap();

    assert_eq!(
        table.columns(),
        [
            "url",
            "product_name",
            "price",
            "stock_status",
            "Dimensions",
            "Weight"
        ]
    );
    assert_eq!(table.rows()[0], ["a", "", "", "", "", "1kg"]);
    assert_eq!(table.rows()[1], ["b", "", "", "", "10x5", ""]);
}

#[test]
fn test_tsv_output() {
    let mut first = record("https://shop.test/a", &[("Weight", "1kg")]);
    first.product_name = Some("Alpha".to_string());
    first.price = Some("$10".to_string());
    first.stock_status = Some("In stock".to_string());
    let second = record("https://shop.test/b", &[("Dimensions", "10x5")]);

    let tsv = assemble(&[first, second]).unwrap().to_tsv();
    assert_eq!(
        tsv,
        "url\tproduct_name\tprice\tstock_status\tDimensions\tWeight\n\
         https://shop.test/a\tAlpha\t$10\tIn stock\t\t1kg\n\
         https://shop.test/b\t\t\t\t10x5\t\n"
    );
}

#[test]
fn test_zero_records_produce_nothing() {
    assert!(assemble(&[]).is_none());
}

#[test]
fn test_fixed_prefix_without_specs() {
    let table = assemble(&[Record::bare("only")]).unwrap();
    assert_eq!(table.columns(), FIXED_COLUMNS);
    assert_eq!(table.rows(), [vec!["only", "", "", ""]]);
}

#[test]
fn test_suffix_sorted_without_duplicates() {
    let records = vec![
        record("a", &[("Weight", "1"), ("ISO Sensitivity", "100")]),
        record("b", &[("Weight", "2"), ("Continuous Shooting Speed", "10 fps")]),
        record("c", &[("Dimensions", "1x1"), ("ISO Sensitivity", "200")]),
    ];
    let columns = column_order(&records);

    assert_eq!(&columns[..4], FIXED_COLUMNS);
    let suffix = &columns[4..];
    assert_eq!(
        suffix,
        ["Continuous Shooting Speed", "Dimensions", "ISO Sensitivity", "Weight"]
    );
}

#[test]
fn test_rows_follow_input_order_and_are_rectangular() {
    let records = vec![
        record("z", &[("Weight", "1")]),
        record("a", &[]),
        record("m", &[("Lens Mount", "EF"), ("Weight", "2")]),
    ];
    let table = assemble(&records).unwrap();

    let urls: Vec<_> = table.rows().iter().map(|row| row[0].as_str()).collect();
    assert_eq!(urls, ["z", "a", "m"]);
    for row in table.rows() {
        assert_eq!(row.len(), table.columns().len());
    }
}

#[test]
fn test_embedded_tab_is_not_escaped() {
    let mut rec = Record::bare("u");
    rec.stock_status = Some("In\tstock".to_string());
    let tsv = assemble(&[rec]).unwrap().to_tsv();
    assert!(tsv.ends_with("u\t\t\tIn\tstock\n"));
}
