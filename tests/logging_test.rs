use std::fs;
use std::path::Path;
use xml_order_ingest::utils::logging;
use xml_order_ingest::{App, Config};

const MALFORMED: &str = "<Order><OrderID>300</OrderID><Customer>";
const NO_CUSTOMER: &str = "<Order><OrderID>200</OrderID></Order>";

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn config_in(root: &Path) -> Config {
    Config {
        xml_folder: path_str(&root.join("xml-files")),
        json_output_folder: path_str(&root.join("json-output")),
        db_path: path_str(&root.join("orders.db")),
        log_file: path_str(&root.join("process.log")),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_failed_file_logs_each_retry_and_final_error() {
    let root = tempfile::tempdir().unwrap();
    let config = config_in(root.path());
    fs::create_dir(&config.xml_folder).unwrap();
    fs::write(Path::new(&config.xml_folder).join("bad.xml"), MALFORMED).unwrap();
    fs::write(Path::new(&config.xml_folder).join("nocustomer.xml"), NO_CUSTOMER).unwrap();

    logging::init_log_file(&config.log_file).unwrap();
    let subscriber = logging::subscriber(&config).unwrap();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = App::initialize(config.clone()).await.unwrap();
    let stats = app.run().await.unwrap();
    assert_eq!(stats.failed, 2);

    let log = fs::read_to_string(&config.log_file).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert!(log.contains("订单处理日志"));

    for name in ["bad.xml", "nocustomer.xml"] {
        for attempt in 1..=config.max_retries {
            let retry = format!("重试 {} ({}/{})", name, attempt, config.max_retries);
            let hits: Vec<&&str> = lines.iter().filter(|l| l.contains(&retry)).collect();
            assert_eq!(hits.len(), 1, "缺少重试日志: {}", retry);
            assert!(hits[0].contains("WARN"));
        }

        let final_error = format!("处理 {} 失败，已重试 {} 次", name, config.max_retries);
        let hits: Vec<&&str> = lines.iter().filter(|l| l.contains(&final_error)).collect();
        assert_eq!(hits.len(), 1, "缺少最终失败日志: {}", final_error);
        assert!(hits[0].contains("ERROR"));
    }

    let parse_errors = lines
        .iter()
        .filter(|l| l.contains("ERROR") && l.contains("[parse]") && l.contains("bad.xml"))
        .count();
    assert_eq!(parse_errors, config.max_retries);

    let validation_errors = lines
        .iter()
        .filter(|l| l.contains("ERROR") && l.contains("[validation]") && l.contains("<Customer>"))
        .count();
    assert_eq!(validation_errors, config.max_retries);
}
