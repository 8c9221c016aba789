//! Static catalog of the string methods offered for completion and
//! recognised by the highlighter.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpelMethod {
    pub name: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    pub returns: &'static str,
    /// Parameter names in call order. Optional ones end with `?`.
    pub parameters: &'static [&'static str],
}

impl SpelMethod {
    /// Popup-style signature, e.g. `substring(startIndex, endIndex) -> string`.
    pub fn signature(&self) -> String {
        format!("{}({}) -> {}", self.name, self.parameters.join(", "), self.returns)
    }
}

macro_rules! method {
    ($name:expr, $description:expr, $example:expr, $returns:expr) => {
        method!($name, $description, $example, $returns, [])
    };
    ($name:expr, $description:expr, $example:expr, $returns:expr, [$($param:expr),*]) => {
        SpelMethod {
            name: $name,
            description: $description,
            example: $example,
            returns: $returns,
            parameters: &[$($param),*],
        }
    };
}

pub static SPEL_METHODS: &[SpelMethod] = &[
    method!("get", "Retrieves a value from the context by key", "get('city')", "any", ["key"]),
    method!("equals", "Compares two values for equality", "get('city').equals('London')", "boolean", ["value"]),
    method!(
        "equalsIgnoreCase",
        "Compares two values for equality - Ignores Case",
        "get('city').equalsIgnoreCase('London')",
        "boolean",
        ["value"]
    ),
    method!("toUpperCase", "Converts string to uppercase", "get('city').toUpperCase()", "string"),
    method!("toLowerCase", "Converts string to lowercase", "get('city').toLowerCase()", "string"),
    method!("concat", "Concatenates strings", "get('str1').concat(get('str2'))", "string", ["str"]),
    method!(
        "contains",
        "Checks if string contains substring",
        "get('text').contains('search')",
        "boolean",
        ["substring"]
    ),
    method!("length", "Returns the length of string", "get('text').length()", "number"),
    method!(
        "substring",
        "Extracts part of string from startIndex (inclusive) to endIndex (exclusive)",
        "get('text').substring(0, 3)",
        "string",
        ["startIndex", "endIndex"]
    ),
    method!("trim", "Removes leading and trailing whitespace", "get('text').trim()", "string"),
    method!(
        "replace",
        "Replaces all occurrences of target with replacement",
        "get('text').replace('old', 'new')",
        "string",
        ["target", "replacement"]
    ),
    method!(
        "replaceAll",
        "Replaces all occurrences matching regex pattern with replacement",
        r"get('text').replaceAll('\s+', ' ')",
        "string",
        ["regex", "replacement"]
    ),
    method!(
        "replaceFirst",
        "Replaces first occurrence matching regex pattern with replacement",
        r"get('text').replaceFirst('\d+', '#')",
        "string",
        ["regex", "replacement"]
    ),
    method!(
        "startsWith",
        "Checks if string starts with prefix, optionally from given position",
        "get('text').startsWith('prefix', 0)",
        "boolean",
        ["prefix", "position?"]
    ),
    method!(
        "endsWith",
        "Checks if string ends with suffix",
        "get('text').endsWith('suffix')",
        "boolean",
        ["suffix"]
    ),
    method!(
        "indexOf",
        "Returns index of first occurrence of substring, or -1 if not found. Optionally starts search from position",
        "get('text').indexOf('search', 0)",
        "number",
        ["str", "position?"]
    ),
    method!(
        "lastIndexOf",
        "Returns index of last occurrence of substring, or -1 if not found. Optionally starts search from position",
        "get('text').lastIndexOf('search', text.length())",
        "number",
        ["str", "position?"]
    ),
    method!(
        "matches",
        "Checks if string matches regex pattern",
        "get('text').matches('[A-Za-z]+')",
        "boolean",
        ["regex"]
    ),
    method!(
        "split",
        "Splits string by regex delimiter, optionally limiting number of splits",
        "get('text').split(',', 2)",
        "string[]",
        ["regex", "limit?"]
    ),
    method!("isEmpty", "Checks if string is empty (length = 0)", "get('text').isEmpty()", "boolean"),
    method!(
        "isBlank",
        "Checks if string is empty or contains only whitespace",
        "get('text').isBlank()",
        "boolean"
    ),
    method!(
        "strip",
        "Removes leading and trailing whitespace (Unicode-aware)",
        "get('text').strip()",
        "string"
    ),
    method!(
        "stripLeading",
        "Removes leading whitespace (Unicode-aware)",
        "get('text').stripLeading()",
        "string"
    ),
    method!(
        "stripTrailing",
        "Removes trailing whitespace (Unicode-aware)",
        "get('text').stripTrailing()",
        "string"
    ),
    method!("repeat", "Repeats string count times", "get('text').repeat(3)", "string", ["count"]),
    method!(
        "subSequence",
        "Returns CharSequence from start (inclusive) to end (exclusive)",
        "get('text').subSequence(0, 3)",
        "string",
        ["start", "end"]
    ),
    method!(
        "compareToIgnoreCase",
        "Compares strings lexicographically, ignoring case",
        "get('text').compareToIgnoreCase('other')",
        "number",
        ["other"]
    ),
    method!(
        "compareTo",
        "Compares strings lexicographically",
        "get('text').compareTo('other')",
        "number",
        ["other"]
    ),
    method!(
        "contentEquals",
        "Checks if string contains same character sequence",
        "get('text').contentEquals('other')",
        "boolean",
        ["other"]
    ),
    method!(
        "formatted",
        "Returns formatted string using arguments",
        "get('Hello %s').formatted('World')",
        "string",
        ["...args"]
    ),
    method!("indent", "Adjusts indentation of each line", "get('text').indent(2)", "string", ["level"]),
    method!(
        "transform",
        "Applies function to string",
        "get('text').transform(str => str.toUpperCase())",
        "any",
        ["function"]
    ),
    method!(
        "translateEscapes",
        "Translates escape sequences",
        r"get('text\n').translateEscapes()",
        "string"
    ),
];

/// Exact, case-sensitive lookup.
pub fn find_method(name: &str) -> Option<&'static SpelMethod> {
    SPEL_METHODS.iter().find(|method| method.name == name)
}
