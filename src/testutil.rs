//! Local HTTP server and fixture helpers for unit tests.

use std::path::Path;
use std::thread;

use tiny_http::{Header, Response, Server};

pub struct Reply {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Reply {
    pub fn status(status: u16, body: &str) -> Self {
        Reply {
            status,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn json(body: serde_json::Value) -> Self {
        Reply {
            status: 200,
            body: body.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    pub fn redirect(status: u16, location: &str) -> Self {
        Reply {
            status,
            body: String::new(),
            headers: vec![("Location".to_string(), location.to_string())],
        }
    }
}

/// Serve requests on 127.0.0.1 until the test process exits.
/// Returns the base URL, e.g. `http://127.0.0.1:41234`.
pub fn spawn_server<F>(route: F) -> String
where
    F: Fn(&str) -> Reply + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || {
        for request in server.incoming_requests() {
            let reply = route(request.url());
            let mut response = Response::from_string(reply.body).with_status_code(reply.status);
            for (name, value) in &reply.headers {
                let header = Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap();
                response = response.with_header(header);
            }
            let _ = request.respond(response);
        }
    });
    format!("http://{addr}")
}

/// A deployment that answers every request the way production should.
pub fn healthy_route(path: &str) -> Reply {
    match path {
        "/api/auth/providers" => Reply::json(serde_json::json!({
            "google": {
                "id": "google",
                "name": "Google",
                "type": "oauth",
                "signinUrl": "https://squad.cronberry.com/api/auth/signin/google",
                "callbackUrl": "https://squad.cronberry.com/api/auth/callback/google"
            }
        })),
        "/api/auth/signin/google" => Reply::redirect(
            302,
            "https://accounts.google.com/o/oauth2/v2/auth?client_id=1234.apps.googleusercontent.com&scope=openid%20email&response_type=code&redirect_uri=https%3A%2F%2Fsquad.cronberry.com%2Fapi%2Fauth%2Fcallback%2Fgoogle",
        ),
        "/api/summary" | "/api/activity" | "/api/leaderboard" | "/api/rules" | "/api/cycles" => {
            Reply::json(serde_json::json!({ "ok": true }))
        }
        _ => Reply::status(404, "{\"error\":\"Not found\"}"),
    }
}

pub const AUTH_ROUTE: &str = r#"
const handler = NextAuth({
  providers: [
    GoogleProvider({
      clientId: process.env.GOOGLE_CLIENT_ID,
      clientSecret: process.env.GOOGLE_CLIENT_SECRET,
    }),
  ],
  callbacks: {
    async signIn({ user }) {
      const allowedDomains =
        process.env.ALLOWED_GOOGLE_WORKSPACE_DOMAIN?.split(",") || ["maaruji.com", "cronberry.com"];
      return allowedDomains.some((d) => user.email.endsWith(d));
    },
  },
  session: {
    strategy: 'jwt',
    maxAge: 30 * 24 * 60 * 60,
  },
  secret: process.env.NEXTAUTH_SECRET,
  debug: false,
});
"#;

pub const MIDDLEWARE: &str = r#"
export async function middleware(req) {
  const token = await getToken({ req, secret: process.env.NEXTAUTH_SECRET });
  const allowedDomains = process.env.ALLOWED_GOOGLE_WORKSPACE_DOMAIN?.split(",");
  return NextResponse.next();
}
"#;

pub const API_ROUTE: &str = r#"
const GAS_BASE_URL = process.env.NEXT_PUBLIC_GAS_BASE_URL;
const mockSummary = { total: 0 };
const mockActivity = [];
if (!GAS_BASE_URL) {
  return NextResponse.json({ error: "GAS URL not configured" }, { status: 500 });
}
"#;

pub const ENV_FILE: &str =
    "# production\nNEXT_PUBLIC_BASE_URL=https://squad.cronberry.com\nMONGO_URL=mongodb://mongo:27017/squad\n";

/// Lay out an app tree with the default relative paths.
pub fn write_app_tree(root: &Path, env: &str, auth_route: &str, middleware: &str, api_route: &str) {
    let auth_dir = root.join("app/api/auth/[...nextauth]");
    let api_dir = root.join("app/api/[[...path]]");
    std::fs::create_dir_all(&auth_dir).unwrap();
    std::fs::create_dir_all(&api_dir).unwrap();
    std::fs::write(root.join(".env"), env).unwrap();
    std::fs::write(auth_dir.join("route.js"), auth_route).unwrap();
    std::fs::write(root.join("middleware.js"), middleware).unwrap();
    std::fs::write(api_dir.join("route.js"), api_route).unwrap();
}
