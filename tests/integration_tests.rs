#![cfg(feature = "cli")]

use anyhow::Result;
use customer_importer::{
    customer_csv_to_domain_count, CliConfig, DomainCount, DomainCountPipeline, EtlEngine,
    ImportError, InvalidAddressPolicy, LocalStorage, OutputFormat,
};
use std::collections::HashMap;
use tempfile::TempDir;

const CUSTOMERS: &str = "first_name,last_name,email,gender,ip_address
Mildred,Hernandez,mhernandez0@github.io,Female,38.194.51.128
Bonnie,Ortiz,bortiz1@cyberchimps.com,Female,197.54.209.129
Dennis,Henry,dhenry2@github.io,Male,155.75.186.217
";

fn write_customers(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("customers.csv");
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn cli_config(input: &str, output: &str) -> CliConfig {
    CliConfig {
        input: Some(input.to_string()),
        output: Some(output.to_string()),
        ..Default::default()
    }
}

#[test]
fn test_three_rows_two_sharing_a_domain() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_customers(&temp_dir, CUSTOMERS);

    let counts = customer_csv_to_domain_count(&input)?;

    assert_eq!(
        counts,
        vec![
            DomainCount::new("cyberchimps.com", 1),
            DomainCount::new("github.io", 2),
        ]
    );
    assert_eq!(counts.iter().map(DomainCount::count).sum::<usize>(), 3);
    Ok(())
}

#[test]
fn test_header_only_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_customers(&temp_dir, "first_name,last_name,email\n");

    assert!(customer_csv_to_domain_count(&input)?.is_empty());
    Ok(())
}

#[test]
fn test_short_row_fails_whole_batch() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_customers(
        &temp_dir,
        "first_name,last_name,email\nA,B,a@x.com\nC,D\nE,F,e@y.com\n",
    );

    let result = customer_csv_to_domain_count(&input);

    assert!(matches!(
        result,
        Err(ImportError::ShortRow { line: 3, found: 2, .. })
    ));
}

#[test]
fn test_unbalanced_quote_fails_instead_of_swallowing_rows() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_customers(
        &temp_dir,
        "first_name,last_name,email\nA,B,\"a@x.com\nC,D,c@y.com\n",
    );

    let result = customer_csv_to_domain_count(&input);

    assert!(matches!(
        result,
        Err(ImportError::UnterminatedQuote { line: 2 })
    ));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = customer_csv_to_domain_count(temp_dir.path().join("missing.csv"));
    assert!(matches!(result, Err(ImportError::FileError { .. })));
}

#[test]
fn test_output_is_sorted_and_counts_match_rows() -> Result<()> {
    let domains = ["zoho.com", "a.io", "mail.ru", "a.io", "", "Zoho.com", "mail.ru"];
    let mut content = String::from("first_name,last_name,email\n");
    let mut expected: HashMap<String, usize> = HashMap::new();
    for i in 0..300 {
        let domain = domains[i % domains.len()];
        let email = if domain.is_empty() {
            format!("user{}", i)
        } else {
            format!("user{}@{}", i, domain)
        };
        content.push_str(&format!("First{},Last{},{}\n", i, i, email));
        *expected.entry(domain.to_string()).or_default() += 1;
    }

    let temp_dir = TempDir::new()?;
    let input = write_customers(&temp_dir, &content);
    let counts = customer_csv_to_domain_count(&input)?;

    assert!(counts.windows(2).all(|w| w[0].domain() < w[1].domain()));
    assert_eq!(counts.len(), expected.len());
    for pair in &counts {
        assert_eq!(expected[pair.domain()], pair.count(), "domain {:?}", pair.domain());
    }
    assert_eq!(counts.iter().map(DomainCount::count).sum::<usize>(), 300);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_csv_file_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_customers(&temp_dir, CUSTOMERS);
    let output = temp_dir.path().join("out").join("domains.csv");
    let output = output.to_str().unwrap();

    let pipeline = DomainCountPipeline::new(LocalStorage::default(), cli_config(&input, output));
    let engine = EtlEngine::new(pipeline);

    let report = engine.run().await?;

    assert_eq!(report.destination, output);
    assert_eq!(report.rows_processed, 3);
    assert_eq!(report.distinct_domains, 2);
    assert_eq!(
        std::fs::read_to_string(output)?,
        "cyberchimps.com,1\ngithub.io,2\n"
    );
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_json_with_monitoring() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_customers(&temp_dir, CUSTOMERS);
    let output = temp_dir.path().join("domains.json");
    let output = output.to_str().unwrap();

    let mut config = cli_config(&input, output);
    config.format = Some(OutputFormat::Json);
    config.monitor = true;

    let pipeline = DomainCountPipeline::new(LocalStorage::default(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, true);
    engine.run().await?;

    let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(output)?)?;
    assert_eq!(
        parsed,
        serde_json::json!([
            {"domain": "cyberchimps.com", "count": 1},
            {"domain": "github.io", "count": 2}
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_invalid_address_policies_change_totals() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_customers(
        &temp_dir,
        "first_name,last_name,email\nA,B,a@x.com\nC,D,justthe.domain\nE,F,e@x.com\nG,H,justtoplevel\n",
    );
    let output = temp_dir.path().join("domains.csv");
    let output = output.to_str().unwrap();

    // keep: 無效地址計入空網域
    let pipeline = DomainCountPipeline::new(LocalStorage::default(), cli_config(&input, output));
    let kept = EtlEngine::new(pipeline).run().await?;
    assert_eq!(kept.rows_processed, 4);
    assert_eq!(kept.invalid_addresses, 2);
    assert_eq!(kept.rows_skipped, 0);
    assert_eq!(std::fs::read_to_string(output)?, ",2\nx.com,2\n");

    // skip: 無效地址不計入
    let mut config = cli_config(&input, output);
    config.invalid_addresses = Some(InvalidAddressPolicy::Skip);
    let pipeline = DomainCountPipeline::new(LocalStorage::default(), config);
    let skipped = EtlEngine::new(pipeline).run().await?;
    assert_eq!(skipped.rows_processed, 4);
    assert_eq!(skipped.invalid_addresses, 2);
    assert_eq!(skipped.rows_skipped, 2);
    assert_eq!(std::fs::read_to_string(output)?, "x.com,2\n");
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_unopenable_input() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("missing.csv");
    let output = temp_dir.path().join("domains.csv");

    let config = cli_config(input.to_str().unwrap(), output.to_str().unwrap());
    let pipeline = DomainCountPipeline::new(LocalStorage::default(), config);

    let err = EtlEngine::new(pipeline).run().await.unwrap_err();

    assert!(matches!(err, ImportError::FileError { .. }));
    assert_eq!(err.severity().exit_code(), 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_job_config_file_fills_cli_options() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_customers(
        &temp_dir,
        "email,first_name,last_name\na@x.com,A,B\nb@x.com,C,D\n",
    );
    let output = temp_dir.path().join("domains.csv");
    let job_path = temp_dir.path().join("job.toml");
    std::fs::write(
        &job_path,
        format!(
            "[input]\npath = {:?}\nemail_column = \"email\"\n\n[output]\npath = {:?}\n",
            input,
            output.to_str().unwrap()
        ),
    )?;

    let config = CliConfig {
        config: Some(job_path.to_str().unwrap().to_string()),
        ..Default::default()
    }
    .resolve()?;

    let pipeline = DomainCountPipeline::new(LocalStorage::default(), config);
    EtlEngine::new(pipeline).run().await?;

    assert_eq!(std::fs::read_to_string(&output)?, "x.com,2\n");
    Ok(())
}
