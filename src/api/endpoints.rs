// Endpoint descriptor table for the TVU portal
//
// Every operation is a POST against a fixed path; what varies is how the
// request is encoded. Field names in form and JSON payloads are dictated
// by the upstream API and spelled exactly as it expects them.

use serde_json::Value;

/// How an endpoint expects its request encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Key/value pairs as application/x-www-form-urlencoded
    Form,
    /// application/json body
    Json,
    /// No body, text/plain content type, metadata in custom headers
    HeaderOnly,
}

/// Static descriptor for one logical portal operation
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    pub path: &'static str,
    pub encoding: Encoding,
}

pub const LOGIN: Endpoint = Endpoint {
    name: "login",
    path: "/api/auth/login",
    encoding: Encoding::Form,
};

pub const SCHEDULE: Endpoint = Endpoint {
    name: "schedule",
    path: "/api/sch/w-locdstkbtuanusertheohocky",
    encoding: Encoding::Form,
};

pub const GRADES: Endpoint = Endpoint {
    name: "grades",
    path: "/public/api/srm/w-locdsdiemsinhvien",
    encoding: Encoding::HeaderOnly,
};

pub const TUITION: Endpoint = Endpoint {
    name: "tuition",
    path: "/public/api/rms/w-locdstonghophocphisv",
    encoding: Encoding::HeaderOnly,
};

pub const CURRICULUM: Endpoint = Endpoint {
    name: "curriculum",
    path: "/public/api/sch/w-locdsctdtsinhvien",
    encoding: Encoding::Json,
};

pub const STUDENT_INFO: Endpoint = Endpoint {
    name: "student_info",
    path: "/public/api/dkmh/w-locsinhvieninfo",
    encoding: Encoding::HeaderOnly,
};

pub const POSTS: Endpoint = Endpoint {
    name: "posts",
    path: "/public/api/web/w-locdsbaidang",
    encoding: Encoding::Json,
};

/// Request payload, tagged by encoding
#[derive(Debug, Clone)]
pub enum Payload {
    Form(Vec<(String, String)>),
    Json(Value),
    Empty,
}

impl Payload {
    /// Encoding this payload serializes as
    pub fn encoding(&self) -> Encoding {
        match self {
            Payload::Form(_) => Encoding::Form,
            Payload::Json(_) => Encoding::Json,
            Payload::Empty => Encoding::HeaderOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(LOGIN.path, "/api/auth/login");
        assert_eq!(SCHEDULE.path, "/api/sch/w-locdstkbtuanusertheohocky");
        assert_eq!(GRADES.path, "/public/api/srm/w-locdsdiemsinhvien");
        assert_eq!(TUITION.path, "/public/api/rms/w-locdstonghophocphisv");
        assert_eq!(CURRICULUM.path, "/public/api/sch/w-locdsctdtsinhvien");
        assert_eq!(STUDENT_INFO.path, "/public/api/dkmh/w-locsinhvieninfo");
        assert_eq!(POSTS.path, "/public/api/web/w-locdsbaidang");
    }

    #[test]
    fn test_endpoint_encodings() {
        assert_eq!(LOGIN.encoding, Encoding::Form);
        assert_eq!(SCHEDULE.encoding, Encoding::Form);
        assert_eq!(GRADES.encoding, Encoding::HeaderOnly);
        assert_eq!(TUITION.encoding, Encoding::HeaderOnly);
        assert_eq!(CURRICULUM.encoding, Encoding::Json);
        assert_eq!(STUDENT_INFO.encoding, Encoding::HeaderOnly);
        assert_eq!(POSTS.encoding, Encoding::Json);
    }

    #[test]
    fn test_payload_encoding_mapping() {
        let form = Payload::Form(vec![("a".to_string(), "1".to_string())]);
        assert_eq!(form.encoding(), Encoding::Form);

        let body = Payload::Json(json!({"filter": {}}));
        assert_eq!(body.encoding(), Encoding::Json);

        assert_eq!(Payload::Empty.encoding(), Encoding::HeaderOnly);
    }
}
