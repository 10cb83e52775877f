//! Built-in demo codebase.

use super::FileRecord;

const CLIENT: &str = r#"import { getAuthToken } from '../services/auth.ts';

export class ApiClient {
    constructor() {
        console.log('API Client initialized');
    }

    fetchData(endpoint) {
        const token = getAuthToken();
        console.log(`Fetching ${endpoint} with token ${token}`);
        return { success: true };
    }
}
"#;

const AUTH: &str = r#"import { ApiClient } from '../api/client.ts'; // Oh no! Circular dependency

let authToken = 'secret-token-123';

export function getAuthToken() {
    // This function creates a tight coupling
    const client = new ApiClient();
    console.log('Auth service is using the API client...');
    return authToken;
}

export function setAuthToken(token) {
    authToken = token;
}
"#;

const FORMATTERS: &str = r#"
export function formatDate(date) {
    return date.toLocaleDateString('en-US');
}

export function formatCurrency(amount) {
    return `$${amount.toFixed(2)}`;
}
"#;

const USER_PROFILE: &str = r#"import { ApiClient } from '../api/client.ts';
import { formatDate } from '../utils/formatters.ts';

export const UserProfile = ({ userId }) => {
    const client = new ApiClient();
    const user = client.fetchData(`/users/${userId}`);
    const joinDate = new Date();

    return (
        '<div>' +
        '<h2>User Profile</h2>' +
        '<p>Joined on: ' + formatDate(joinDate) + '</p>' +
        '</div>'
    );
};
"#;

const SETTINGS: &str = r#"import { ApiClient } from '../api/client.ts';
import { formatCurrency } from '../utils/formatters.ts';

export const Settings = () => {
    const client = new ApiClient();
    const settings = client.fetchData('/settings');
    const balance = 123.45;

    return (
        '<div>' +
        '<h2>Settings</h2>' +
        '<p>Balance: ' + formatCurrency(balance) + '</p>' +
        '</div>'
    );
};
"#;

const OLD_UTILS: &str = r#"// This file contains deprecated functions.

export function oldUnusedFunction() {
    console.log("I am never called.");
    return true;
}

export function anotherOldOne() {
    return 'still here';
}
"#;

pub(super) fn seed_files() -> Vec<FileRecord> {
    vec![
        FileRecord::new("src/api/client.ts", CLIENT),
        FileRecord::new("src/services/auth.ts", AUTH),
        FileRecord::new("src/utils/formatters.ts", FORMATTERS),
        FileRecord::new("src/components/UserProfile.tsx", USER_PROFILE),
        FileRecord::new("src/components/Settings.tsx", SETTINGS),
        FileRecord::new("src/legacy/old-utils.ts", OLD_UTILS),
    ]
}
