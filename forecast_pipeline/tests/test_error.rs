use forecast_math::MathError;
use forecast_pipeline::PipelineError;
use std::io;
use std::path::PathBuf;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let pipeline_error = PipelineError::from(io_error);
    assert!(matches!(pipeline_error, PipelineError::Io(_)));

    let math_error = MathError::SingularMatrix("rank 2 < 3".to_string());
    let pipeline_error = PipelineError::from(math_error);
    match pipeline_error {
        PipelineError::Math(MathError::SingularMatrix(msg)) => assert_eq!(msg, "rank 2 < 3"),
        other => panic!("Expected Math variant, got {:?}", other),
    }

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(
        PipelineError::from(json_error),
        PipelineError::Json(_)
    ));
}

#[test]
fn test_error_display() {
    let error = PipelineError::FileNotFound(PathBuf::from("data/processed/processed_data.csv"));
    assert_eq!(
        error.to_string(),
        "File not found: data/processed/processed_data.csv"
    );

    let error = PipelineError::Parse {
        line: 7,
        column: "Data_Lag1".to_string(),
        message: "expected a number, found 'x'".to_string(),
    };
    let text = error.to_string();
    assert!(text.contains("line 7"));
    assert!(text.contains("Data_Lag1"));

    let error = PipelineError::MissingColumn {
        column: "Absolute_Error".to_string(),
        path: PathBuf::from("outputs/predictions.csv"),
    };
    assert_eq!(
        error.to_string(),
        "Missing column 'Absolute_Error' in outputs/predictions.csv"
    );

    let error = PipelineError::from(MathError::DivisionByZero("row 3".to_string()));
    assert_eq!(error.to_string(), "Math error: Division by zero: row 3");
}
