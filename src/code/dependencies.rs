use std::collections::BTreeSet;

/// Import name to the package that provides it.
pub const KNOWN_IMPORTS: [(&str, &str); 14] = [
    ("sklearn", "scikit-learn"),
    ("pandas", "pandas"),
    ("numpy", "numpy"),
    ("matplotlib", "matplotlib"),
    ("seaborn", "seaborn"),
    ("tensorflow", "tensorflow"),
    ("torch", "torch"),
    ("cv2", "opencv-python"),
    ("PIL", "Pillow"),
    ("plotly", "plotly"),
    ("keras", "keras"),
    ("scipy", "scipy"),
    ("xgboost", "xgboost"),
    ("lightgbm", "lightgbm"),
];

/// Packages a generated Python program needs, by substring match on
/// `import <name>` / `from <name>`.
pub fn detect_dependencies(code: &str) -> BTreeSet<String> {
    KNOWN_IMPORTS
        .iter()
        .filter(|(import, _)| {
            code.contains(&format!("import {}", import))
                || code.contains(&format!("from {}", import))
        })
        .map(|(_, package)| package.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_import() {
        let deps = detect_dependencies("import pandas as pd\ndf = pd.DataFrame()");
        assert_eq!(deps, BTreeSet::from(["pandas".to_string()]));
    }

    #[test]
    fn test_mapped_package_names() {
        let code = "from sklearn.linear_model import LinearRegression\nimport cv2\nfrom PIL import Image";
        let deps = detect_dependencies(code);
        assert_eq!(
            deps,
            BTreeSet::from([
                "Pillow".to_string(),
                "opencv-python".to_string(),
                "scikit-learn".to_string()
            ])
        );
    }

    #[test]
    fn test_repeated_imports_reported_once() {
        let code = "import numpy\nimport numpy as np\nfrom numpy import linalg";
        assert_eq!(detect_dependencies(code).len(), 1);
    }

    #[test]
    fn test_no_known_imports() {
        assert!(detect_dependencies("import os\nprint('hi')").is_empty());
        assert!(detect_dependencies("").is_empty());
    }
}
