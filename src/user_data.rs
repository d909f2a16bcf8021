use crate::config::Secrets;

/// Backend address written to the application's `.env`.
pub const BACKEND_URL: &str = "http://localhost:8000";

/// Directory the boot script prepares for the application.
pub const APP_DIR: &str = "/app";

/// Render the `/app/.env` contents: one `KEY=VALUE` per line.
///
/// Values are written verbatim, without quoting or escaping.
#[must_use]
pub fn render_env_file(secrets: &Secrets) -> String {
    format!(
        "LINGO_API_KEY={}\n\
         LINGO_PROJECT_ID={}\n\
         GROQ_API_KEY={}\n\
         OPENAI_API_KEY={}\n\
         BACKEND_URL={BACKEND_URL}\n",
        secrets.lingo_api_key,
        secrets.lingo_project_id,
        secrets.groq_api_key,
        secrets.openai_api_key,
    )
}

/// Render the cloud-init boot script sent as instance user data.
///
/// On first boot it updates the system, installs Docker, Docker
/// Compose, Node.js and the Lingo CLI, creates [`APP_DIR`] and
/// writes the `.env` file. Cloning the repository and starting the
/// stack are left commented out.
///
/// # Example
///
/// ```
/// use vultr_deploy::config::Secrets;
/// use vultr_deploy::user_data;
///
/// let script = user_data::render(&Secrets::default());
///
/// assert!(script.starts_with("#!/bin/bash\n"));
/// assert!(script.contains("GROQ_API_KEY=\n"));
/// assert!(script.contains("BACKEND_URL=http://localhost:8000\n"));
/// ```
#[must_use]
pub fn render(secrets: &Secrets) -> String {
    let env_file = render_env_file(secrets);

    format!(
        r#"#!/bin/bash
# Health Assistant Auto-Setup Script

# Update system
apt-get update
apt-get upgrade -y

# Install Docker
curl -fsSL https://get.docker.com -o get-docker.sh
sh get-docker.sh
systemctl start docker
systemctl enable docker

# Install Docker Compose
curl -L "https://github.com/docker/compose/releases/latest/download/docker-compose-$(uname -s)-$(uname -m)" -o /usr/local/bin/docker-compose
chmod +x /usr/local/bin/docker-compose

# Install Node.js and npm
curl -fsSL https://deb.nodesource.com/setup_18.x | bash -
apt-get install -y nodejs

# Install Lingo CLI
npm install -g @lingo/cli

# Create app directory
mkdir -p {APP_DIR}
cd {APP_DIR}

# Clone repository (update with your repo URL)
# git clone https://github.com/your-username/health-assistant.git .

# Set environment variables
cat > {APP_DIR}/.env << EOF
{env_file}EOF

# Start application
# docker-compose up -d --build

echo "✅ Server setup complete!"
echo "Please upload your application files and run: docker-compose up -d --build"
"#
    )
}
