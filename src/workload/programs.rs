use std::collections::BTreeMap;
use std::sync::Arc;

use super::types::{CaseKind, Language};

/// Program texts keyed by language and case kind. The harness never looks
/// inside a payload; it only forwards it as the submission's `code`.
#[derive(Debug, Clone, Default)]
pub struct PayloadTable {
    entries: BTreeMap<(Language, CaseKind), Arc<str>>,
}

impl PayloadTable {
    /// Table with one program per language and case kind.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for language in Language::ALL {
            for case in CaseKind::ALL {
                table.insert(language, case, builtin_program(language, case));
            }
        }
        table
    }

    pub fn insert(&mut self, language: Language, case: CaseKind, payload: &str) {
        self.entries.insert((language, case), Arc::from(payload));
    }

    #[must_use]
    pub fn payload(&self, language: Language, case: CaseKind) -> Option<Arc<str>> {
        self.entries.get(&(language, case)).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const fn builtin_program(language: Language, case: CaseKind) -> &'static str {
    match (language, case) {
        (Language::Python, CaseKind::Success) => PYTHON_SUCCESS,
        (Language::Python, CaseKind::Tle) => PYTHON_TLE,
        (Language::Python, CaseKind::Mle) => PYTHON_MLE,
        (Language::Python, CaseKind::CompileError) => PYTHON_COMPILE_ERROR,
        (Language::Java, CaseKind::Success) => JAVA_SUCCESS,
        (Language::Java, CaseKind::Tle) => JAVA_TLE,
        (Language::Java, CaseKind::Mle) => JAVA_MLE,
        (Language::Java, CaseKind::CompileError) => JAVA_COMPILE_ERROR,
        (Language::Cpp, CaseKind::Success) => CPP_SUCCESS,
        (Language::Cpp, CaseKind::Tle) => CPP_TLE,
        (Language::Cpp, CaseKind::Mle) => CPP_MLE,
        (Language::Cpp, CaseKind::CompileError) => CPP_COMPILE_ERROR,
    }
}

const PYTHON_SUCCESS: &str = r"
x = int(input().strip())
print(x + 1)
";

const PYTHON_TLE: &str = r"
while True:
    pass
";

const PYTHON_MLE: &str = r"
a = [0] * (10**8)
print(len(a))
";

const PYTHON_COMPILE_ERROR: &str = r#"
def main()
    print("missing colon")
"#;

const JAVA_SUCCESS: &str = r"
import java.util.*;

public class Main {
    public static void main(String[] args) {
        Scanner sc = new Scanner(System.in);
        int x = sc.nextInt();
        System.out.println(x + 1);
    }
}
";

const JAVA_TLE: &str = r"
public class Main {
    public static void main(String[] args) {
        while (true) {}
    }
}
";

const JAVA_MLE: &str = r"
public class Main {
    public static void main(String[] args) {
        int[] a = new int[300_000_000];
        System.out.println(a.length);
    }
}
";

const JAVA_COMPILE_ERROR: &str = r#"
public class Main {
    public static void main(String[] args) {
        System.out.println("missing semicolon")
    }
}
"#;

const CPP_SUCCESS: &str = r#"
#include <bits/stdc++.h>
using namespace std;

int main() {
    long long x;
    if (!(cin >> x)) return 0;
    cout << (x + 1) << "\n";
    return 0;
}
"#;

const CPP_TLE: &str = r"
#include <bits/stdc++.h>
using namespace std;

int main() {
    while (true) {}
    return 0;
}
";

const CPP_MLE: &str = r#"
#include <bits/stdc++.h>
using namespace std;

int main() {
    vector<int> a(300000000);
    cout << a.size() << "\n";
    return 0;
}
"#;

const CPP_COMPILE_ERROR: &str = r#"
#include <bits/stdc++.h>
using namespace std;

int main() {
    cout << "missing semicolon" << endl
    return 0;
}
"#;
