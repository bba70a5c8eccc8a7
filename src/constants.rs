//! Fixed attack tables, network tuning knobs and embedded reference data.
//!
//! Everything here is read-only process-wide state; components that need a
//! parsed form build it once at construction time.

/// `alg` values probed by the none-signature attack, in probe order.
pub const NONE_VARIATIONS: [&str; 4] = ["none", "None", "NONE", "nOnE"];

/// `kid` values probed by the key-id traversal attack, in probe order.
/// Each one aims at a null-device-like key file on the target.
pub const KID_NULL_PATHS: [&str; 10] = [
    "/dev/null",
    "\\dev\\null",
    "null",
    "NULL",
    "Null",
    "/dev/zero",
    "\\dev\\zero",
    "zero",
    "ZERO",
    "Zero",
];

/// HMAC key used for every kid-traversal signing attempt: a single zero
/// byte, matching the content a null-device key file would yield.
pub const KID_NULL_KEY: [u8; 1] = [0x00];

/// Modulus size for the key pair generated by the JWK injection attack.
pub const RSA_KEY_BITS: usize = 2048;

/// hashcat hash-mode for JWT (HS256) secrets.
pub const HASHCAT_JWT_MODE: &str = "16500";

pub const REPLAY_TIMEOUT_SECS: u64 = 5;
pub const ARCHIVE_TIMEOUT_SECS: u64 = 60;
pub const ARCHIVE_PAGE_SIZE: usize = 100;
pub const ARCHIVE_MAX_RESULTS: usize = 150_000;
pub const ARCHIVE_MAX_RETRIES: u32 = 5;
pub const ARCHIVE_RETRY_WAIT_SECS: u64 = 10;
pub const ARCHIVE_PAGE_DELAY_SECS: u64 = 2;

/// Built-in dictionary for the in-process secret check, used when no
/// wordlist file is supplied.
pub const JWT_COMMON: &str = "secret
secret1
secretkey
secret-key
secret_key
password
password1
password123
changeme
letmein
welcome
admin
administrator
root
test
testing
dev
development
qwerty
abc123
123456
1234567890
jwt
jwt-secret
jwt_secret
jwtsecret
token
tokensecret
auth
authsecret
api
apikey
api-key
api_secret
key
privatekey
private
public
supersecret
mysecret
my-secret
hmac-secret
signing-key
signingkey
default
example
sample
demo";

/// Paths probed by the common-files scan, in probe order.
pub const COMMON_FILES: &str = "/robots.txt
/sitemap.xml
/.git/config
/.git/HEAD
/.gitignore
/.env
/.env.local
/.env.backup
/.env.production
/.htaccess
/.htpasswd
/.DS_Store
/.svn/entries
/.hg/hgrc
/.dockerignore
/Dockerfile
/docker-compose.yml
/config.php
/config.php.bak
/config.json
/config.yml
/config.yaml
/settings.py
/settings.json
/app.config
/web.config
/wp-config.php
/wp-config.php.bak
/wp-login.php
/database.yml
/database.sql
/db.sql
/dump.sql
/backup.sql
/backup.zip
/backup.tar.gz
/site.tar.gz
/www.zip
/admin/
/administrator/
/phpmyadmin/
/phpinfo.php
/info.php
/test.php
/server-status
/server-info
/.well-known/security.txt
/crossdomain.xml
/clientaccesspolicy.xml
/package.json
/package-lock.json
/composer.json
/composer.lock
/yarn.lock
/Gemfile
/Gemfile.lock
/requirements.txt
/id_rsa
/id_rsa.pub
/.ssh/id_rsa
/.bash_history
/.aws/credentials
/.npmrc
/error.log
/errors.log
/access.log
/debug.log
/logs/error.log
/swagger.json
/swagger-ui.html
/api-docs
/openapi.json
/graphql
/actuator/health
/actuator/env
/elmah.axd
/trace.axd
/WEB-INF/web.xml
/META-INF/MANIFEST.MF
/CHANGELOG.md
/README.md
/LICENSE
/VERSION
/version.txt";

/// Header-name-to-description database consumed by the header analyzer.
pub const HTTP_HEADERS_JSON: &str = r#"{
  "request_headers": {
    "Accept": "Media types the client can process",
    "Accept-Charset": "Character sets the client can process",
    "Accept-Encoding": "Content encodings the client can process",
    "Accept-Language": "Natural languages the client prefers",
    "Authorization": "Credentials for authenticating the client with the server",
    "Cache-Control": "Directives for caching mechanisms along the request chain",
    "Connection": "Control options for the current connection",
    "Content-Length": "Size of the request body in bytes",
    "Content-Type": "Media type of the request body",
    "Cookie": "Stored HTTP cookies previously sent by the server",
    "DNT": "Do Not Track preference",
    "Expect": "Behaviors the client expects from the server",
    "Forwarded": "Information from the client side of proxy servers",
    "From": "Email address of the requesting user",
    "Host": "Domain name of the server and optional port",
    "If-Match": "Conditional request on entity tag match",
    "If-Modified-Since": "Conditional request on modification date",
    "If-None-Match": "Conditional request on entity tag mismatch",
    "If-Range": "Conditional range request",
    "If-Unmodified-Since": "Conditional request on unmodified date",
    "Max-Forwards": "Limit on proxy/gateway forwarding hops",
    "Origin": "Origin of the cross-site request",
    "Pragma": "Implementation-specific directives (HTTP/1.0 caching)",
    "Proxy-Authorization": "Credentials for authenticating with a proxy",
    "Range": "Requested byte range of the resource",
    "Referer": "Address of the page that linked to the requested resource",
    "Sec-Fetch-Dest": "Destination of the fetch request",
    "Sec-Fetch-Mode": "Mode of the fetch request",
    "Sec-Fetch-Site": "Relationship between request initiator and target origin",
    "Sec-Fetch-User": "Whether a navigation was user-activated",
    "TE": "Transfer encodings the client will accept",
    "Upgrade": "Protocol upgrade request",
    "Upgrade-Insecure-Requests": "Client preference for an encrypted response",
    "User-Agent": "Identification string of the client software",
    "Via": "Proxies the request passed through",
    "X-Forwarded-For": "Originating client IP through a proxy or load balancer",
    "X-Forwarded-Host": "Original host requested by the client",
    "X-Forwarded-Proto": "Original protocol requested by the client",
    "X-Requested-With": "Identifies Ajax requests (commonly XMLHttpRequest)",
    "X-CSRF-Token": "Anti cross-site-request-forgery token",
    "X-Api-Key": "Application-level API key"
  },
  "response_headers": {
    "Accept-Ranges": "Whether the server supports range requests",
    "Access-Control-Allow-Credentials": "Whether the response may be exposed with credentials",
    "Access-Control-Allow-Headers": "Headers allowed in the actual cross-origin request",
    "Access-Control-Allow-Methods": "Methods allowed in the actual cross-origin request",
    "Access-Control-Allow-Origin": "Origins allowed to read the response",
    "Age": "Seconds the object has been in a proxy cache",
    "Allow": "Methods supported by the resource",
    "Cache-Control": "Directives for caching mechanisms along the response chain",
    "Connection": "Control options for the current connection",
    "Content-Disposition": "Presentation hint for the response body",
    "Content-Encoding": "Encoding applied to the response body",
    "Content-Language": "Natural language of the response body",
    "Content-Length": "Size of the response body in bytes",
    "Content-Security-Policy": "Controls resources the user agent may load",
    "Content-Type": "Media type of the response body",
    "Date": "Date and time the message originated",
    "ETag": "Identifier for a specific version of the resource",
    "Expires": "Date/time after which the response is stale",
    "Last-Modified": "Last modification date of the resource",
    "Location": "Redirect target or location of a created resource",
    "Permissions-Policy": "Controls browser features available to the page",
    "Pragma": "Implementation-specific directives (HTTP/1.0 caching)",
    "Referrer-Policy": "How much referrer information is sent with requests",
    "Retry-After": "How long to wait before a follow-up request",
    "Server": "Identification string of the server software",
    "Set-Cookie": "Cookie to store on the client",
    "Strict-Transport-Security": "Forces HTTPS for future requests",
    "Transfer-Encoding": "Transfer encoding applied to the body",
    "Vary": "Request headers that determine cache matching",
    "Via": "Proxies the response passed through",
    "WWW-Authenticate": "Authentication scheme to access the resource",
    "X-Content-Type-Options": "Disables MIME sniffing when set to nosniff",
    "X-Frame-Options": "Whether the page may be rendered in a frame",
    "X-Powered-By": "Technology stack hint leaked by the server",
    "X-XSS-Protection": "Legacy cross-site-scripting filter toggle"
  }
}"#;
